use std::{
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::*;

/// Kaggle API token, i.e. the contents of `kaggle.json`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct KaggleCredential {
    pub username: String,
    pub key: String,
}

impl fmt::Debug for KaggleCredential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KaggleCredential")
            .field("username", &self.username)
            .field("key", &"***")
            .finish()
    }
}

/// Environment variables understood by the official Kaggle CLI.
#[derive(Debug, Default, Deserialize)]
struct KaggleEnv {
    kaggle_username: Option<String>,
    kaggle_key: Option<String>,
    kaggle_config_dir: Option<PathBuf>,
}

impl KaggleCredential {
    pub const FILENAME: &str = "kaggle.json";

    pub fn new(username: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            key: key.into(),
        }
    }

    /// Loads the credential from the process environment, falling back to `kaggle.json`.
    pub fn load() -> Result<Self> {
        Self::load_from_vars(kaggle_vars(std::env::vars_os()), dirs::home_dir())
    }

    /// Resolution order:
    /// 1. `KAGGLE_USERNAME` and `KAGGLE_KEY`
    /// 2. `$KAGGLE_CONFIG_DIR/kaggle.json`
    /// 3. `~/.kaggle/kaggle.json`
    pub fn load_from_vars<I>(vars: I, home_dir: Option<PathBuf>) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: KaggleEnv = envy::from_iter(vars)?;

        if let (Some(username), Some(key)) = (&env.kaggle_username, &env.kaggle_key) {
            if !username.is_empty() && !key.is_empty() {
                log::debug!("Using Kaggle credential from environment variables");
                return Ok(Self::new(username, key));
            }
        }

        let config_dir = env
            .kaggle_config_dir
            .or_else(|| home_dir.map(|home| home.join(".kaggle")))
            .ok_or_else(|| Error::NoCredential {
                searched: PathBuf::from("~/.kaggle"),
            })?;
        let filepath = config_dir.join(Self::FILENAME);

        match Self::from_json_file(&filepath) {
            Err(Error::CredentialFile { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Err(Error::NoCredential { searched: filepath })
            }
            res => res,
        }
    }

    pub fn from_json_file(filepath: impl AsRef<Path>) -> Result<Self> {
        let filepath = filepath.as_ref();
        let json = std::fs::read_to_string(filepath).map_err(|e| Error::CredentialFile {
            path: filepath.to_owned(),
            source: e,
        })?;
        log::debug!("Using Kaggle credential from {:?}", filepath);
        Self::from_json(&json).map_err(|e| Error::InvalidCredentialFile {
            path: filepath.to_owned(),
            source: e,
        })
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// `KAGGLE_*` pairs of the environment. Other variables, and any that are
/// not valid UTF-8, are never looked at.
fn kaggle_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| match (k.into_string(), v.into_string()) {
            (Ok(k), Ok(v)) if k.starts_with("KAGGLE_") => Some((k, v)),
            _ => None,
        })
}

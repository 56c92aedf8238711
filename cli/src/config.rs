use std::path::PathBuf;

use kwatch_core::Config;

use crate::{cmd::GlobalArgs, util};

pub const APP_NAME: &str = "kwatch-cli";

#[derive(Debug, Clone)]
pub struct GlobalConfig {
    /// Where the config file is (or would be) located.
    pub path: PathBuf,
    pub file: Config,
}

impl GlobalConfig {
    pub fn default_filepath() -> PathBuf {
        let dir = dirs::config_dir().unwrap_or_else(util::current_dir);
        dir.join(APP_NAME).join(Config::FILENAME)
    }

    /// `--config` must point to an existing file;
    /// the default location may be absent.
    pub fn from_file_and_args(args: &GlobalArgs) -> anyhow::Result<Self> {
        let GlobalArgs {
            subcmd: _,
            config,
            verbose: _,
        } = args;

        let (path, file) = match config {
            Some(path) => (path.clone(), Config::from_toml_file(path)?),
            None => {
                let path = Self::default_filepath();
                let file = Config::from_toml_file_or_default(&path)?;
                (path, file)
            }
        };
        if file.source_config_file.is_some() {
            log::debug!("Loaded config {:?}", util::replace_homedir_to_tilde(&path));
        }
        Ok(Self { path, file })
    }
}

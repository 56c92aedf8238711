use std::{
    path::{Path, PathBuf},
    process::exit,
};

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn path_outside_home_is_kept() {
        if ::dirs::home_dir().map_or(false, |home| Path::new("/etc").starts_with(home)) {
            return;
        }
        assert_eq!(
            replace_homedir_to_tilde("/etc/kwatch.toml"),
            PathBuf::from("/etc/kwatch.toml")
        );
    }

    #[test]
    fn path_under_home_gets_tilde() {
        let Some(home) = ::dirs::home_dir() else {
            return
        };
        assert_eq!(
            replace_homedir_to_tilde(home.join(".config/kwatch-cli/kwatch.toml")),
            PathBuf::from("~/.config/kwatch-cli/kwatch.toml")
        );
    }
}

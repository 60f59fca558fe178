const CONFIG_DIR: &str = "patchwork";
const CONFIG_FILE: &str = "config.toml";

/// Editor settings, read from TOML. Every field is optional in the file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spaces a tab expands to on screen.
    pub tab_stop: usize,
    pub start_mode: crate::key::Mode,
    /// Rows kept visible above and below the cursor when scrolling.
    pub scrolloff: usize,
    pub show_status: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            start_mode: crate::key::Mode::Navigate,
            scrolloff: 0,
            show_status: true,
        }
    }
}

impl Config {
    /// `<config dir>/patchwork/config.toml`, if the platform has a config
    /// directory.
    #[must_use]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads `path`, or the default location when `path` is `None`.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly requested file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this struct.
    pub fn load(path: Option<&std::path::Path>) -> crate::errors::SessionResult<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());

                return Ok(Self::default());
            }
            Err(source) => return Err(crate::errors::SessionError::ConfigRead { path, source }),
        };

        let config = Self::from_toml(&text)
            .map_err(|source| crate::errors::SessionError::ConfigParse { path: path.clone(), source })?;

        log::info!("loaded config from {}", path.display());

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the TOML error if `text` does not describe a config.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/*!
Loader configuration.

Values come from defaults, optionally overridden by a TOML file, then by
command line flags. Every key is optional in the file.

```toml
repair_header = true
map_chr = false
load_trainer = true
```
*/

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Replace a corrupt header with its repaired copy before resolving banks.
    pub repair_header: bool,
    /// Include the CHR page in the bank plan.
    pub map_chr: bool,
    /// Copy the trainer to $7000 when the header declares one.
    pub load_trainer: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            repair_header: false,
            map_chr: true,
            load_trainer: true,
        }
    }
}

impl LoaderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_repair_header(mut self, repair: bool) -> Self {
        self.repair_header = repair;
        self
    }

    pub fn with_map_chr(mut self, map_chr: bool) -> Self {
        self.map_chr = map_chr;
        self
    }

    pub fn with_load_trainer(mut self, load: bool) -> Self {
        self.load_trainer = load;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let cfg = LoaderConfig::from_toml_str("").expect("parse");
        assert_eq!(cfg, LoaderConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = LoaderConfig::from_toml_str("repair_header = true").expect("parse");
        assert!(cfg.repair_header);
        assert!(cfg.map_chr);
        assert!(cfg.load_trainer);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = LoaderConfig::default()
            .with_repair_header(true)
            .with_map_chr(false);
        let text = toml::to_string(&cfg).expect("serialize");
        assert_eq!(LoaderConfig::from_toml_str(&text).expect("parse"), cfg);
    }

    #[test]
    fn bad_value_is_parse_error() {
        let err = LoaderConfig::from_toml_str("map_chr = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LoaderConfig::load("/nonexistent/cartmap.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

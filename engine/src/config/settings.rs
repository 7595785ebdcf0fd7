// Engine settings, loaded from a JSON file or defaulted
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Environment variable naming the JSON settings file.
pub const CONFIG_PATH_ENV: &str = "DASHBOARD_ENGINE_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Directory holding one `<TICKER>.csv` file of daily bars per symbol.
    pub data_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl EngineSettings {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e)))
    }

    /// Reads the file named by `DASHBOARD_ENGINE_CONFIG`, or falls back to defaults.
    pub fn from_env() -> Result<Self, EngineError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, EngineError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| EngineError::ConfigError(format!("Invalid listen address '{}:{}': {}", self.host, self.port, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_partial_settings_keeps_defaults() {
        let file = create_settings_file(r#"{ "port": 6000, "data_dir": "/srv/prices" }"#);
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 6000);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/prices"));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = create_settings_file("{ port: ");
        let err = EngineSettings::load(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = EngineSettings::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_socket_addr() {
        assert_eq!(EngineSettings::default().socket_addr().unwrap().port(), 50051);
        let settings = EngineSettings { host: "not a host".to_string(), ..EngineSettings::default() };
        assert!(settings.socket_addr().is_err());
    }
}

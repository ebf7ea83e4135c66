use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional `ucdb.toml` settings. CLI flags win over the config file,
/// which wins over the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UcdbConfig {
    pub database: Option<String>,
    pub xml: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("ucdb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("ucd.db")
}

pub fn default_xml_path() -> PathBuf {
    PathBuf::from("./ucd.all.grouped.xml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<UcdbConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: UcdbConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Resolve a path from CLI flag, config value, then default
pub fn resolve_path(
    flag: Option<PathBuf>,
    configured: Option<&str>,
    default: PathBuf,
) -> PathBuf {
    flag.or_else(|| configured.map(PathBuf::from))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucdb.toml");

        assert!(load_config(Some(&path)).unwrap().is_none());
    }

    #[test]
    fn test_load_config_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucdb.toml");
        std::fs::write(&path, "database = \"custom.db\"\nxml = \"export.xml\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.as_deref(), Some("custom.db"));
        assert_eq!(config.xml.as_deref(), Some("export.xml"));
    }

    #[test]
    fn test_resolution_order() {
        let flag = Some(PathBuf::from("flag.db"));
        let configured = Some("config.db");

        assert_eq!(
            resolve_path(flag, configured, default_database_path()),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            resolve_path(None, configured, default_database_path()),
            PathBuf::from("config.db")
        );
        assert_eq!(
            resolve_path(None, None, default_database_path()),
            PathBuf::from("ucd.db")
        );
    }
}

mod settings;

pub use settings::{Config, ReportSettings, SourceSettings, DEFAULT_VIEW};

use crate::error::{OverdueError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, falling back to ~/.overdue/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "overdue") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        OverdueError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".overdue"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Expand `~` and anchor relative paths at the config directory.
pub fn resolve_path(path: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_relative() {
        cfg_dir.join(expanded)
    } else {
        expanded
    }
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(OverdueError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(OverdueError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    parse_config(&content).map_err(|e| OverdueError::ConfigParse { path, source: e })
}

fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Write the config template into a fresh config directory.
pub fn init_config_dir(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(OverdueError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Where overdue bills are read from.
[source]
kind = "rest"
url = "https://your-project.supabase.co"
api_key = "your-anon-key"
view = "boletos_em_atraso_30_dias"
timeout_secs = 10

# To read a local JSON export instead:
# [source]
# kind = "file"
# path = "bills.json"   # relative to this directory

[report]
output_dir = "output"   # relative to this directory, ~ allowed
footer = "Relatório de Inadimplência"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses() {
        let config = parse_config(CONFIG_TEMPLATE).unwrap();
        match config.source {
            SourceSettings::Rest {
                view, timeout_secs, ..
            } => {
                assert_eq!(view, DEFAULT_VIEW);
                assert_eq!(timeout_secs, 10);
            }
            other => panic!("unexpected source {other:?}"),
        }
        assert_eq!(config.report.output_dir, "output");
    }

    #[test]
    fn test_file_source_with_defaults() {
        let config = parse_config("[source]\nkind = \"file\"\npath = \"bills.json\"\n").unwrap();
        assert_eq!(
            config.source,
            SourceSettings::File {
                path: "bills.json".into()
            }
        );
        assert_eq!(config.report, ReportSettings::default());
    }

    #[test]
    fn test_unknown_source_kind_fails() {
        assert!(parse_config("[source]\nkind = \"ftp\"\n").is_err());
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/etc/overdue");
        assert_eq!(resolve_path("output", base), PathBuf::from("/etc/overdue/output"));
        assert_eq!(resolve_path("/tmp/out", base), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_init_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cfg");
        init_config_dir(&dir).unwrap();
        assert!(dir.join("config.toml").exists());
        assert!(load_config(&dir).is_ok());
        assert!(matches!(
            init_config_dir(&dir),
            Err(OverdueError::AlreadyInitialized(_))
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("missing");
        assert!(matches!(load_config(&dir), Err(OverdueError::ConfigNotFound(_))));
    }
}

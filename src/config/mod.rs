mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./formforge.toml",
        "~/.config/formforge/config.toml",
        "/etc/formforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if !config.storage.uploads_dir.exists() {
        tracing::warn!(
            "Uploads directory does not exist: {:?}",
            config.storage.uploads_dir
        );
    }

    for (name, path) in [
        ("inkscape", &config.tools.inkscape_path),
        ("soffice", &config.tools.soffice_path),
        ("pandoc", &config.tools.pandoc_path),
        ("magick", &config.tools.magick_path),
        ("ffmpeg", &config.tools.ffmpeg_path),
    ] {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Configured {} path does not exist: {:?}", name, path);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.conversion.chunk_size, 4);
        assert!(config.tools.soffice_path.is_none());
    }

    #[test]
    fn test_load_config_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[conversion]
chunk_size = 8

[storage]
uploads_dir = "/tmp"
output_dir = "/tmp"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.conversion.chunk_size, 8);
        assert_eq!(config.storage.uploads_dir, Path::new("/tmp"));
    }

    #[test]
    fn test_zero_chunk_size_is_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[conversion]\nchunk_size = 0").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.conversion.chunk_size, 0);
    }

    #[test]
    fn test_missing_tool_override_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[tools]\nsoffice_path = \"/nonexistent/soffice-xyz\""
        )
        .unwrap();

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("/nonexistent/config.toml")).is_err());
    }
}

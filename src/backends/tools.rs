//! External tool detection and management.

use std::path::{Path, PathBuf};
use std::process::Command;

use formforge_common::{Error, Result};

use crate::config::ToolsConfig;

/// Information about an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
pub fn check_tool(name: &str) -> ToolInfo {
    check_tool_with_arg(name, "--version")
}

/// Check if a tool is available using a custom version argument.
pub fn check_tool_with_arg(name: &str, version_arg: &str) -> ToolInfo {
    let result = Command::new(name).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            let path = which::which(name).ok();

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path,
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check every conversion tool the default backends wrap.
pub fn check_tools(config: &ToolsConfig) -> Vec<ToolInfo> {
    [
        ("inkscape", &config.inkscape_path),
        ("soffice", &config.soffice_path),
        ("pandoc", &config.pandoc_path),
        ("magick", &config.magick_path),
        ("ffmpeg", &config.ffmpeg_path),
    ]
    .into_iter()
    .map(|(name, override_path)| {
        let program = override_path
            .as_deref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| name.to_string());
        let version_arg = if name == "ffmpeg" { "-version" } else { "--version" };
        let mut info = check_tool_with_arg(&program, version_arg);
        info.name = name.to_string();
        info
    })
    .collect()
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}

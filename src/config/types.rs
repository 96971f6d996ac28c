use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Number of files converted concurrently before the next group starts.
    /// Zero disables chunking: every file in a batch runs at once.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    4
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding input files for conversion.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Directory conversion outputs are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory for the result database. Defaults to the config file's
    /// directory, or the working directory without a config file.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("./uploads")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            output_dir: default_output_dir(),
            data_dir: None,
        }
    }
}

/// Optional binary path overrides for the wrapped external tools.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub inkscape_path: Option<PathBuf>,

    #[serde(default)]
    pub soffice_path: Option<PathBuf>,

    #[serde(default)]
    pub pandoc_path: Option<PathBuf>,

    #[serde(default)]
    pub magick_path: Option<PathBuf>,

    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
}

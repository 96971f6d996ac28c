//! FFmpeg backend: audio and video conversion.
//!
//! Video and audio are separate categories so an audio file never claims a
//! video container as a reachable target merely because ffmpeg handles both.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_common::Result;

use crate::backends::{run_tool, ConverterBackend};
use crate::config::ToolsConfig;
use crate::registry::CapabilityDescriptor;

pub struct FfmpegBackend {
    program: PathBuf,
}

impl FfmpegBackend {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            program: tools
                .ffmpeg_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
        }
    }
}

#[async_trait]
impl ConverterBackend for FfmpegBackend {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new()
            .category(
                "video",
                &[
                    "3gp", "avi", "flv", "m4v", "mkv", "mov", "mp4", "mpeg", "ts", "webm", "wmv",
                ],
                &["avi", "gif", "mkv", "mov", "mp4", "mpeg", "webm"],
            )
            .category(
                "audio",
                &["aac", "flac", "m4a", "mp3", "ogg", "opus", "wav", "wma"],
                &["aac", "flac", "m4a", "mp3", "ogg", "opus", "wav"],
            )
    }

    async fn convert(
        &self,
        input: &Path,
        _source_ext: &str,
        _target_ext: &str,
        target_path: &Path,
        _options: Option<&serde_json::Value>,
    ) -> Result<String> {
        let args = vec![
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-y".to_string(),
            target_path.to_string_lossy().to_string(),
        ];
        run_tool(&self.program, &args, "ffmpeg").await
    }
}

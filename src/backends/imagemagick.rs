//! ImageMagick backend: general raster image conversion.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_common::Result;

use crate::backends::{run_tool, ConverterBackend};
use crate::config::ToolsConfig;
use crate::registry::CapabilityDescriptor;

pub struct ImageMagickBackend {
    program: PathBuf,
}

impl ImageMagickBackend {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            program: tools
                .magick_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("magick")),
        }
    }
}

#[async_trait]
impl ConverterBackend for ImageMagickBackend {
    fn name(&self) -> &'static str {
        "imagemagick"
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new().category(
            "image",
            &[
                "avif", "bmp", "gif", "heic", "ico", "jpeg", "png", "ppm", "psd", "svg", "tga",
                "tiff", "webp",
            ],
            &[
                "bmp", "gif", "ico", "jpeg", "pdf", "png", "ppm", "tga", "tiff", "webp",
            ],
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
        // The target format is inferred from the output extension.
        let args = vec![
            input.to_string_lossy().to_string(),
            target_path.to_string_lossy().to_string(),
        ];
        run_tool(&self.program, &args, "magick").await
    }
}

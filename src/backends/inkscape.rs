//! Inkscape backend: vector graphics conversion.
//!
//! Registered ahead of the raster pipeline so vector sources (SVG, EMF, WMF)
//! are converted without an intermediate rasterization step.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_common::Result;

use crate::backends::{run_tool, ConverterBackend};
use crate::config::ToolsConfig;
use crate::registry::CapabilityDescriptor;

pub struct InkscapeBackend {
    program: PathBuf,
}

impl InkscapeBackend {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            program: tools
                .inkscape_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("inkscape")),
        }
    }
}

#[async_trait]
impl ConverterBackend for InkscapeBackend {
    fn name(&self) -> &'static str {
        "inkscape"
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new().category(
            "vector",
            &["ai", "emf", "eps", "pdf", "ps", "svg", "svgz", "wmf"],
            &["emf", "eps", "pdf", "png", "ps", "svg", "wmf"],
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
            input.to_string_lossy().to_string(),
            format!("--export-filename={}", target_path.to_string_lossy()),
        ];
        run_tool(&self.program, &args, "inkscape").await
    }
}

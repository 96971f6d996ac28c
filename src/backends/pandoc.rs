//! Pandoc backend: markup document interchange.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_common::Result;

use crate::backends::{run_tool, ConverterBackend};
use crate::config::ToolsConfig;
use crate::registry::CapabilityDescriptor;

pub struct PandocBackend {
    program: PathBuf,
}

impl PandocBackend {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            program: tools
                .pandoc_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("pandoc")),
        }
    }
}

#[async_trait]
impl ConverterBackend for PandocBackend {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new().category(
            "markup",
            &[
                "docx", "epub", "gfm", "html", "ipynb", "latex", "markdown", "md", "odt", "org",
                "rst", "textile",
            ],
            &[
                "docx", "epub", "gfm", "html", "latex", "md", "odt", "org", "pdf", "pptx", "rst",
                "txt",
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
        // Pandoc infers both formats from the file extensions.
        let args = vec![
            input.to_string_lossy().to_string(),
            "-o".to_string(),
            target_path.to_string_lossy().to_string(),
        ];
        run_tool(&self.program, &args, "pandoc").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_covers_markup_pairs() {
        let descriptor = PandocBackend::new(&ToolsConfig::default()).descriptor();
        assert!(descriptor.supports("md", "html"));
        assert!(descriptor.supports("rst", "docx"));
        assert!(!descriptor.supports("txt", "md"));
    }
}

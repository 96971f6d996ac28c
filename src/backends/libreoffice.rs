//! LibreOffice backend: office document conversion via headless `soffice`.
//!
//! LibreOffice selects import/export behavior through named filters. The
//! filter tables below are keyed per category; a conversion pair resolves
//! filters only when both extensions sit in the same category's table,
//! mirroring the capability descriptor's category scoping. Pairs without a
//! filter entry still convert: `soffice` infers the format from the target
//! extension alone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formforge_common::Result;

use crate::backends::{run_tool, ConverterBackend};
use crate::config::ToolsConfig;
use crate::registry::CapabilityDescriptor;

/// Import filter names per text-category extension.
const TEXT_FILTERS: &[(&str, &str)] = &[
    ("csv", "Text"),
    ("doc", "MS Word 97"),
    ("docm", "MS Word 2007 XML VBA"),
    ("docx", "MS Word 2007 XML"),
    ("epub", "EPUB"),
    ("fodt", "OpenDocument Text Flat XML"),
    ("html", "HTML (StarWriter)"),
    ("odt", "writer8"),
    ("ott", "writer8_template"),
    ("pages", "Apple Pages"),
    ("rtf", "Rich Text Format"),
    ("txt", "Text"),
    ("wpd", "WordPerfect"),
    ("xhtml", "HTML (StarWriter)"),
    ("xml", "OpenDocument Text Flat XML"),
];

/// Import/export filter names per impress-category extension.
const IMPRESS_FILTERS: &[(&str, &str)] = &[
    ("fodp", "OpenDocument Presentation Flat XML"),
    ("html", "impress_html_Export"),
    ("odp", "impress8"),
    ("otp", "impress8_template"),
    ("pdf", "impress_pdf_Export"),
    ("ppt", "MS PowerPoint 97"),
    ("pptx", "Impress MS PowerPoint 2007 XML"),
    ("sxi", "StarOffice XML (Impress)"),
];

fn lookup(table: &[(&'static str, &'static str)], ext: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == ext)
        .map(|(_, filter)| *filter)
}

/// Resolve (import, export) filters for a conversion pair.
///
/// Both extensions must resolve within the same category table; otherwise no
/// filters are applied and soffice falls back to extension inference.
fn filters_for(source_ext: &str, target_ext: &str) -> (Option<&'static str>, Option<&'static str>) {
    if let (Some(input), Some(output)) = (
        lookup(TEXT_FILTERS, source_ext),
        lookup(TEXT_FILTERS, target_ext),
    ) {
        return (Some(input), Some(output));
    }
    if let (Some(input), Some(output)) = (
        lookup(IMPRESS_FILTERS, source_ext),
        lookup(IMPRESS_FILTERS, target_ext),
    ) {
        return (Some(input), Some(output));
    }
    (None, None)
}

fn build_args(
    input: &Path,
    source_ext: &str,
    target_ext: &str,
    target_path: &Path,
) -> Vec<String> {
    let outdir = target_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_string_lossy()
        .to_string();

    let mut args = vec!["--headless".to_string(), "--invisible".to_string()];

    let (in_filter, out_filter) = filters_for(source_ext, target_ext);

    if let Some(filter) = in_filter {
        args.push(format!("--infilter={}", filter));
    }

    args.push("--convert-to".to_string());
    match out_filter {
        Some(filter) => args.push(format!("{}:{}", target_ext, filter)),
        None => args.push(target_ext.to_string()),
    }
    args.push("--outdir".to_string());
    args.push(outdir);
    args.push(input.to_string_lossy().to_string());

    args
}

/// Office document conversion through LibreOffice.
pub struct LibreOfficeBackend {
    program: PathBuf,
}

impl LibreOfficeBackend {
    pub fn new(tools: &ToolsConfig) -> Self {
        Self {
            program: tools
                .soffice_path
                .clone()
                .unwrap_or_else(|| PathBuf::from("soffice")),
        }
    }
}

#[async_trait]
impl ConverterBackend for LibreOfficeBackend {
    fn name(&self) -> &'static str {
        "libreoffice"
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new()
            .category(
                "text",
                &[
                    "602", "abw", "csv", "doc", "docm", "docx", "dot", "dotm", "dotx", "epub",
                    "fodt", "html", "hwp", "lwp", "odt", "ott", "pages", "pdf", "psw", "rtf",
                    "sdw", "stw", "sxw", "tab", "tsv", "txt", "wpd", "wps", "wpt", "wri",
                    "xhtml", "xml", "zabw",
                ],
                &[
                    "csv", "doc", "docm", "docx", "epub", "fodt", "html", "odt", "ott", "pdf",
                    "rtf", "tab", "tsv", "txt", "xhtml", "xml",
                ],
            )
            .category(
                "impress",
                &[
                    "fodp", "odp", "otp", "pot", "potm", "potx", "pps", "ppsx", "ppt", "pptm",
                    "pptx", "sxi",
                ],
                &["fodp", "html", "odp", "otp", "pdf", "ppt", "pptx"],
            )
    }

    async fn convert(
        &self,
        input: &Path,
        source_ext: &str,
        target_ext: &str,
        target_path: &Path,
        _options: Option<&serde_json::Value>,
    ) -> Result<String> {
        let args = build_args(input, source_ext, target_ext, target_path);
        run_tool(&self.program, &args, "soffice").await
    }
}

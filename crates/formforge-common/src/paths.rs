//! Extension normalization and output filename handling.
//!
//! The conversion core works with canonical lowercase extensions. Raw
//! extensions taken from user file names pass through [`normalize_filetype`]
//! before any capability lookup, and requested target extensions pass through
//! [`normalize_output_filetype`] before target names are derived.

/// Map a raw source extension to its canonical form.
///
/// Extensions are lowercased; a small alias table folds spellings that name
/// the same format.
///
/// # Examples
///
/// ```
/// use formforge_common::paths::normalize_filetype;
///
/// assert_eq!(normalize_filetype("JPG"), "jpeg");
/// assert_eq!(normalize_filetype("htm"), "html");
/// assert_eq!(normalize_filetype("DOCX"), "docx");
/// ```
pub fn normalize_filetype(filetype: &str) -> String {
    let lowercase = filetype.to_lowercase();
    match lowercase.as_str() {
        "jpg" | "jfif" => "jpeg".to_string(),
        "htm" => "html".to_string(),
        "tex" => "latex".to_string(),
        _ => lowercase,
    }
}

/// Map a requested target extension to the form used in output file names.
///
/// The inverse of [`normalize_filetype`] for the aliased formats: output
/// files carry the conventional short spelling.
///
/// # Examples
///
/// ```
/// use formforge_common::paths::normalize_output_filetype;
///
/// assert_eq!(normalize_output_filetype("JPEG"), "jpg");
/// assert_eq!(normalize_output_filetype("latex"), "tex");
/// assert_eq!(normalize_output_filetype("pdf"), "pdf");
/// ```
pub fn normalize_output_filetype(filetype: &str) -> String {
    let lowercase = filetype.to_lowercase();
    match lowercase.as_str() {
        "jpeg" => "jpg".to_string(),
        "latex" => "tex".to_string(),
        _ => lowercase,
    }
}

/// Extract the raw extension of a file name.
///
/// Returns the text after the final `.`; a file name without a dot yields
/// the whole name, matching how batch requests treat extensionless files.
pub fn raw_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or("")
}

/// Derive a target file name by replacing the **last** occurrence of the raw
/// source extension with the target extension.
///
/// Only the last occurrence is replaced so that names which repeat their
/// extension elsewhere survive intact (`report.pdf.pdf` -> `report.pdf.png`).
/// If the raw extension does not occur, the target extension is appended.
///
/// # Examples
///
/// ```
/// use formforge_common::paths::replace_last_extension;
///
/// assert_eq!(replace_last_extension("report.docx", "docx", "pdf"), "report.pdf");
/// assert_eq!(replace_last_extension("a.png.png", "png", "webp"), "a.png.webp");
/// ```
pub fn replace_last_extension(file_name: &str, raw_ext: &str, target_ext: &str) -> String {
    if raw_ext.is_empty() {
        return format!("{}.{}", file_name, target_ext);
    }
    match file_name.rfind(raw_ext) {
        Some(idx) => {
            let mut out = String::with_capacity(file_name.len() + target_ext.len());
            out.push_str(&file_name[..idx]);
            out.push_str(target_ext);
            out.push_str(&file_name[idx + raw_ext.len()..]);
            out
        }
        None => format!("{}.{}", file_name, target_ext),
    }
}

/// Sanitize a derived file name against path injection.
///
/// Strips path separators, NUL, and other control characters, leaving a name
/// that cannot address anything outside its directory.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '/' && *c != '\\' && !c.is_control())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filetype_aliases() {
        assert_eq!(normalize_filetype("jpg"), "jpeg");
        assert_eq!(normalize_filetype("JFIF"), "jpeg");
        assert_eq!(normalize_filetype("htm"), "html");
        assert_eq!(normalize_filetype("tex"), "latex");
    }

    #[test]
    fn test_normalize_filetype_lowercases() {
        assert_eq!(normalize_filetype("PnG"), "png");
        assert_eq!(normalize_filetype("MKV"), "mkv");
    }

    #[test]
    fn test_normalize_output_filetype() {
        assert_eq!(normalize_output_filetype("jpeg"), "jpg");
        assert_eq!(normalize_output_filetype("LATEX"), "tex");
        assert_eq!(normalize_output_filetype("Pdf"), "pdf");
    }

    #[test]
    fn test_raw_extension() {
        assert_eq!(raw_extension("report.docx"), "docx");
        assert_eq!(raw_extension("archive.tar.gz"), "gz");
        assert_eq!(raw_extension("noext"), "noext");
    }

    #[test]
    fn test_replace_last_extension() {
        assert_eq!(
            replace_last_extension("report.docx", "docx", "pdf"),
            "report.pdf"
        );
        // Only the final occurrence is touched.
        assert_eq!(
            replace_last_extension("png.backup.png", "png", "jpg"),
            "png.backup.jpg"
        );
        // Missing extension appends.
        assert_eq!(replace_last_extension("notes", "txt", "pdf"), "notes.pdf");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_file_name("a\\b/c"), "abc");
        assert_eq!(sanitize_file_name("clean-name.pdf"), "clean-name.pdf");
        assert_eq!(sanitize_file_name("nul\0byte"), "nulbyte");
    }
}

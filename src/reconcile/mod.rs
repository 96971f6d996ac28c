//! Output reconciliation.
//!
//! Backends that explode one logical document into N frames (page-per-file
//! renderers, for example) cannot agree on a single output name in advance,
//! so the exact target path is not guaranteed to exist after a successful
//! adapter call. Reconciliation defers that decision to post-hoc filesystem
//! inspection:
//!
//! 1. **CheckExpected** - if the exact target path exists, the task resolves
//!    to the expected name.
//! 2. **DiscoverFrames** - otherwise, scan the output directory for entries
//!    matching `base-*.ext`, with the base name sanitized against
//!    path-separator injection and glob metacharacters escaped.
//! 3. **Decide** - zero frames is a failure; one frame is renamed to the
//!    expected path; two or more are bundled into `base.zip` under a strict
//!    size ceiling and a containment check on the archive path.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use formforge_common::paths::sanitize_file_name;
use formforge_common::{Error, Result};
use glob::Pattern;
use zip::write::{FileOptions, ZipWriter};

/// Ceiling on the combined size of frames bundled into one archive.
pub const MAX_ZIP_BYTES: u64 = 200 * 1024 * 1024;

/// Reconcile one task's output, returning the final output file name.
///
/// # Errors
///
/// - [`Error::NoOutputGenerated`] when the expected path is absent and no
///   frames are found; nothing is written.
/// - [`Error::ZipMemoryLimitExceeded`] when the frames exceed
///   [`MAX_ZIP_BYTES`]; nothing is written and no frame is deleted.
/// - [`Error::PathTraversalDetected`] when the archive path escapes the
///   output directory.
/// - [`Error::Archive`] when writing the archive fails; any partial archive
///   is removed and the frames are left intact for manual recovery.
pub async fn reconcile_output(
    target_path: &Path,
    expected_name: &str,
    output_dir: &Path,
) -> Result<String> {
    if tokio::fs::try_exists(target_path).await? {
        // Target file exists as expected, return unchanged.
        return Ok(expected_name.to_string());
    }

    tracing::debug!(
        "Multi-frame detection needed for {}: expected file not found at {}",
        expected_name,
        target_path.display()
    );

    let (base_name, extension) = split_expected(expected_name);
    let safe_base = sanitize_file_name(base_name);

    let frames = discover_frames(output_dir, &safe_base, extension).await?;
    tracing::debug!("Detected {} frame file(s) for {}", frames.len(), expected_name);

    match frames.len() {
        0 => Err(Error::no_output(expected_name)),
        1 => {
            let frame_path = output_dir.join(&frames[0]);
            tracing::debug!("Renaming single frame {} -> {}", frames[0], expected_name);
            tokio::fs::rename(&frame_path, target_path).await?;
            Ok(expected_name.to_string())
        }
        _ => bundle_frames(output_dir, &safe_base, &frames).await,
    }
}

/// Split the expected file name into base name and extension.
///
/// Leading-dot names have no extension; the dot must sit past position zero.
fn split_expected(expected_name: &str) -> (&str, &str) {
    match expected_name.rfind('.') {
        Some(idx) if idx > 0 => (&expected_name[..idx], &expected_name[idx + 1..]),
        _ => (expected_name, ""),
    }
}

/// Scan the output directory for frame files matching `base-*.ext`.
///
/// Glob metacharacters in the base name are escaped so a file name cannot
/// inject pattern syntax. Only plain files are considered; matches are
/// sorted for deterministic downstream ordering.
async fn discover_frames(output_dir: &Path, safe_base: &str, extension: &str) -> Result<Vec<String>> {
    let pattern_text = format!("{}-*.{}", Pattern::escape(safe_base), extension);
    let pattern = Pattern::new(&pattern_text)
        .map_err(|e| Error::internal(format!("Invalid frame pattern {}: {}", pattern_text, e)))?;

    let mut frames = Vec::new();
    let mut entries = tokio::fs::read_dir(output_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if pattern.matches(&name) {
            frames.push(name);
        }
    }

    frames.sort();
    Ok(frames)
}

/// Bundle N >= 2 frames into a single flat zip archive and remove them.
async fn bundle_frames(output_dir: &Path, safe_base: &str, frames: &[String]) -> Result<String> {
    let zip_file_name = format!("{}.zip", safe_base);

    // Verify the resolved archive path stays strictly inside the output
    // directory before anything touches the filesystem.
    let resolved_dir = tokio::fs::canonicalize(output_dir).await?;
    let zip_path = resolved_dir.join(&zip_file_name);
    if zip_path.parent() != Some(resolved_dir.as_path()) || !zip_path.starts_with(&resolved_dir) {
        return Err(Error::path_traversal(
            "zip path escapes output directory",
        ));
    }

    // Size the frames up front; the ceiling is checked before any write.
    let mut total_bytes: u64 = 0;
    for frame in frames {
        total_bytes += tokio::fs::metadata(output_dir.join(frame)).await?.len();
    }
    if total_bytes > MAX_ZIP_BYTES {
        return Err(Error::ZipMemoryLimitExceeded {
            total_bytes,
            limit_bytes: MAX_ZIP_BYTES,
        });
    }

    tracing::debug!(
        "Creating zip archive {} for {} frames ({} bytes)",
        zip_file_name,
        frames.len(),
        total_bytes
    );

    let frame_paths: Vec<PathBuf> = frames.iter().map(|f| output_dir.join(f)).collect();
    let archive_path = zip_path.clone();
    let write_result = tokio::task::spawn_blocking(move || write_archive(&archive_path, &frame_paths))
        .await
        .map_err(|e| Error::internal(format!("Archive task panicked: {}", e)))?;

    if let Err(e) = write_result {
        // Clean up any partial zip, but leave frame files intact.
        if zip_path.exists() {
            let _ = std::fs::remove_file(&zip_path);
        }
        return Err(Error::archive(format!(
            "Failed to create zip for {}: {}",
            safe_base, e
        )));
    }

    // Delete individual frame files only after the zip is confirmed written.
    for frame in frames {
        let frame_path = output_dir.join(frame);
        if let Err(e) = tokio::fs::remove_file(&frame_path).await {
            tracing::error!("Failed to delete frame file {}: {}", frame, e);
        }
    }

    Ok(zip_file_name)
}

/// Write every frame into a flat archive, entries named by frame file name.
fn write_archive(zip_path: &Path, frames: &[PathBuf]) -> zip::result::ZipResult<()> {
    let file = std::fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);
    let options: FileOptions<()> = FileOptions::default();

    for frame in frames {
        let name = frame
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| std::io::Error::other("frame file name is not valid UTF-8"))?;
        zip.start_file(name, options)?;
        let mut src = std::fs::File::open(frame)?;
        std::io::copy(&mut src, &mut zip)?;
    }

    let mut inner = zip.finish()?;
    inner.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_expected_basic() {
        assert_eq!(split_expected("report.pdf"), ("report", "pdf"));
        assert_eq!(split_expected("archive.tar.gz"), ("archive.tar", "gz"));
    }

    #[test]
    fn split_expected_no_extension() {
        assert_eq!(split_expected("noext"), ("noext", ""));
        // A leading dot is not an extension separator.
        assert_eq!(split_expected(".hidden"), (".hidden", ""));
    }

    #[test]
    fn frame_pattern_escapes_metacharacters() {
        let escaped = Pattern::escape("page[1]");
        let pattern = Pattern::new(&format!("{}-*.png", escaped)).unwrap();
        assert!(pattern.matches("page[1]-2.png"));
        assert!(!pattern.matches("pageX-2.png"));
    }

    #[tokio::test]
    async fn existing_target_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("done.pdf");
        std::fs::write(&target, b"output").unwrap();

        let name = reconcile_output(&target, "done.pdf", dir.path())
            .await
            .unwrap();
        assert_eq!(name, "done.pdf");
        assert!(target.exists());
    }

    #[tokio::test]
    async fn zero_frames_is_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing.pdf");

        let err = reconcile_output(&target, "missing.pdf", dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NoOutputGenerated(_)));
        // No writes happened.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn single_frame_is_renamed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("doc-1.png"), b"frame").unwrap();
        let target = dir.path().join("doc.png");

        let name = reconcile_output(&target, "doc.png", dir.path())
            .await
            .unwrap();
        assert_eq!(name, "doc.png");
        assert!(target.exists());
        assert!(!dir.path().join("doc-1.png").exists());
    }
}

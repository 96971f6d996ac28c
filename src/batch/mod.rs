//! Batch conversion orchestration.
//!
//! A batch is consumed chunk by chunk: every file in a chunk converts
//! concurrently, and the next chunk starts only once the whole chunk has
//! finished. That gate is the sole backpressure mechanism bounding the number
//! of concurrently outstanding external processes.
//!
//! Failure handling is deliberately asymmetric. A file whose conversion pair
//! is unsupported, or whose backend signals failure, is data: its status is
//! recorded and its siblings keep running. A reconciliation error is a defect
//! in the output handoff: it propagates, fails the chunk's join, and aborts
//! result recording for the files of that chunk that had not reconciled yet.

use std::path::Path;
use std::sync::Arc;

use formforge_common::paths::{
    normalize_filetype, normalize_output_filetype, raw_extension, replace_last_extension,
};
use formforge_common::{JobId, Result, TaskOutcome};
use futures::future::try_join_all;

use crate::reconcile::reconcile_output;
use crate::record::ResultSink;
use crate::registry::BackendRegistry;

/// Partition a slice into fixed-size chunks.
///
/// A non-positive size collapses to a single chunk containing everything.
fn chunks<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    let size = if size == 0 { items.len().max(1) } else { size };
    items.chunks(size)
}

/// Runs batches of conversions against a registry of backends.
pub struct BatchOrchestrator {
    registry: Arc<BackendRegistry>,
    sink: Arc<dyn ResultSink>,
    chunk_size: usize,
}

impl BatchOrchestrator {
    /// Create a new orchestrator.
    ///
    /// `chunk_size` is the number of files converted concurrently before the
    /// next group starts; zero disables chunking.
    pub fn new(registry: Arc<BackendRegistry>, sink: Arc<dyn ResultSink>, chunk_size: usize) -> Self {
        Self {
            registry,
            sink,
            chunk_size,
        }
    }

    /// Convert every file in `file_names`, recording one result per file.
    ///
    /// Chunks execute strictly sequentially; tasks within a chunk complete in
    /// any order. Control returns once every chunk has finished or a
    /// reconciliation defect aborted the run.
    ///
    /// # Errors
    ///
    /// Returns the first reconciliation error encountered; files of the
    /// failed chunk that had not reconciled receive no recorded result, which
    /// callers can detect by comparing requested and recorded counts.
    pub async fn run(
        &self,
        file_names: &[String],
        uploads_dir: &Path,
        output_dir: &Path,
        convert_to: &str,
        backend_override: Option<&str>,
        job_id: JobId,
    ) -> Result<()> {
        tokio::fs::create_dir_all(output_dir).await?;

        for chunk in chunks(file_names, self.chunk_size) {
            try_join_all(chunk.iter().map(|file_name| {
                self.convert_one(
                    file_name,
                    uploads_dir,
                    output_dir,
                    convert_to,
                    backend_override,
                    job_id,
                )
            }))
            .await?;
        }

        Ok(())
    }

    /// Convert a single file and record its result.
    ///
    /// Selection and adapter failures are downgraded to a recorded status;
    /// reconciliation failures and recording failures bubble up.
    async fn convert_one(
        &self,
        file_name: &str,
        uploads_dir: &Path,
        output_dir: &Path,
        convert_to: &str,
        backend_override: Option<&str>,
        job_id: JobId,
    ) -> Result<()> {
        let input_path = uploads_dir.join(file_name);
        let raw_ext = raw_extension(file_name);
        let source_ext = normalize_filetype(raw_ext);
        let target_ext = normalize_filetype(convert_to);
        let output_ext = normalize_output_filetype(convert_to);
        let output_name = replace_last_extension(file_name, raw_ext, &output_ext);
        let target_path = output_dir.join(&output_name);

        let outcome = match self.registry.select(&source_ext, &target_ext, backend_override) {
            Ok(backend) => {
                match backend
                    .adapter
                    .convert(&input_path, &source_ext, &target_ext, &target_path, None)
                    .await
                {
                    Ok(status) => {
                        tracing::info!(
                            "Converted {} from {} to {} using {}",
                            file_name,
                            source_ext,
                            target_ext,
                            backend.name()
                        );
                        TaskOutcome::Completed(status)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to convert {} from {} to {} using {}: {}",
                            file_name,
                            source_ext,
                            target_ext,
                            backend.name(),
                            e
                        );
                        TaskOutcome::AdapterFailed
                    }
                }
            }
            Err(_) => {
                tracing::warn!(
                    "No available converter supports converting from {} to {}",
                    source_ext,
                    target_ext
                );
                TaskOutcome::Unsupported
            }
        };

        let final_name = if outcome.is_success() {
            reconcile_output(&target_path, &output_name, output_dir).await?
        } else {
            output_name
        };

        self.sink
            .record(job_id, file_name, &final_name, outcome.status_text())?;
        Ok(())
    }
}

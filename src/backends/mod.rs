//! Converter backend adapters.
//!
//! Each backend wraps one external conversion tool behind the uniform
//! [`ConverterBackend`] contract. The adapter is solely responsible for
//! producing *some* artifact at or near the target path; it does not
//! guarantee the exact path exists (backends that split one input into many
//! frames cannot), which is why the orchestrator runs reconciliation after
//! every successful invocation. Diagnostic output from the tool is logged as
//! a side channel and never parsed for control decisions.

pub mod ffmpeg;
pub mod imagemagick;
pub mod inkscape;
pub mod libreoffice;
pub mod pandoc;
pub mod tools;

use std::path::Path;

use async_trait::async_trait;
use formforge_common::{Error, Result};
use tokio::process::Command;

use crate::registry::CapabilityDescriptor;

/// The uniform contract every conversion backend satisfies.
#[async_trait]
pub trait ConverterBackend: Send + Sync {
    /// Short identifier, used for explicit selection and logging.
    fn name(&self) -> &'static str;

    /// Category-scoped capability tables, snapshotted by the registry at
    /// registration time.
    fn descriptor(&self) -> CapabilityDescriptor;

    /// Convert `input` to `target_path`.
    ///
    /// Returns a short human-readable status text on success. The output
    /// directory (the target path's parent) is guaranteed to exist; the
    /// backend must write its artifact(s) under that directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdapterFailed`] when the external process cannot be
    /// spawned or exits unsuccessfully.
    async fn convert(
        &self,
        input: &Path,
        source_ext: &str,
        target_ext: &str,
        target_path: &Path,
        options: Option<&serde_json::Value>,
    ) -> Result<String>;
}

/// Run an external tool and translate the exit status into the adapter
/// contract's outcome.
///
/// Stdout and stderr are logged, never interpreted.
pub(crate) async fn run_tool(program: &Path, args: &[String], tool_name: &str) -> Result<String> {
    tracing::debug!("{} args: {:?}", tool_name, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| Error::adapter_failed(format!("Failed to execute {}: {}", tool_name, e)))?;

    if !output.stdout.is_empty() {
        tracing::debug!(
            "{} stdout: {}",
            tool_name,
            String::from_utf8_lossy(&output.stdout).trim_end()
        );
    }
    if !output.stderr.is_empty() {
        tracing::debug!(
            "{} stderr: {}",
            tool_name,
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }

    if !output.status.success() {
        return Err(Error::adapter_failed(format!(
            "{} exited with status: {}",
            tool_name, output.status
        )));
    }

    Ok("Done".to_string())
}

//! Shared test harness for integration tests.
//!
//! Provides scripted fake backends, a concurrency gauge, and an in-memory
//! result sink so orchestration behavior can be exercised without any of the
//! real external tools installed.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use formforge::backends::ConverterBackend;
use formforge::record::ResultSink;
use formforge::registry::{BackendRegistry, CapabilityDescriptor};
use formforge_common::{Error, JobId, Result};

/// What a scripted backend does when invoked.
#[derive(Clone)]
pub enum Script {
    /// Write the expected target file.
    WriteTarget,
    /// Write `base-1.ext` .. `base-N.ext` next to the target instead of it.
    WriteFrames(usize),
    /// Succeed without writing anything.
    WriteNothing,
    /// Signal adapter failure.
    Fail,
}

/// Tracks how many conversions are in flight and the highest count seen.
#[derive(Default)]
pub struct ConcurrencyGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A fake backend driven by a [`Script`].
pub struct ScriptedBackend {
    name: &'static str,
    descriptor: CapabilityDescriptor,
    script: Script,
    pub gauge: Arc<ConcurrencyGauge>,
}

impl ScriptedBackend {
    pub fn new(name: &'static str, descriptor: CapabilityDescriptor, script: Script) -> Self {
        Self {
            name,
            descriptor,
            script,
            gauge: Arc::new(ConcurrencyGauge::default()),
        }
    }
}

#[async_trait]
impl ConverterBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn descriptor(&self) -> CapabilityDescriptor {
        self.descriptor.clone()
    }

    async fn convert(
        &self,
        _input: &Path,
        _source_ext: &str,
        _target_ext: &str,
        target_path: &Path,
        _options: Option<&serde_json::Value>,
    ) -> Result<String> {
        self.gauge.enter();
        // Hold the slot long enough for chunk-mates to overlap.
        tokio::time::sleep(Duration::from_millis(25)).await;

        let result = match &self.script {
            Script::WriteTarget => {
                tokio::fs::write(target_path, b"converted").await?;
                Ok("Done".to_string())
            }
            Script::WriteFrames(count) => {
                let dir = target_path.parent().expect("target has a parent");
                let file_name = target_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .expect("target has a utf-8 name");
                let (base, ext) = file_name.rsplit_once('.').expect("target has an extension");
                for i in 1..=*count {
                    let frame = dir.join(format!("{}-{}.{}", base, i, ext));
                    tokio::fs::write(&frame, format!("frame {}", i)).await?;
                }
                Ok("Done".to_string())
            }
            Script::WriteNothing => Ok("Done".to_string()),
            Script::Fail => Err(Error::adapter_failed("scripted failure")),
        };

        self.gauge.exit();
        result
    }
}

/// One recorded result row.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub job_id: JobId,
    pub file_name: String,
    pub output_file_name: String,
    pub status: String,
}

/// In-memory append-only result sink.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<Recorded>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<Recorded> {
        self.records.lock().unwrap().clone()
    }

    pub fn status_of(&self, file_name: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.file_name == file_name)
            .map(|r| r.status.clone())
    }

    pub fn output_of(&self, file_name: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.file_name == file_name)
            .map(|r| r.output_file_name.clone())
    }
}

impl ResultSink for MemorySink {
    fn record(
        &self,
        job_id: JobId,
        file_name: &str,
        output_file_name: &str,
        status: &str,
    ) -> Result<()> {
        self.records.lock().unwrap().push(Recorded {
            job_id,
            file_name: file_name.to_string(),
            output_file_name: output_file_name.to_string(),
            status: status.to_string(),
        });
        Ok(())
    }
}

/// Build a registry from scripted backends, in the given priority order.
pub fn registry_of(backends: Vec<ScriptedBackend>) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    for backend in backends {
        registry.register(Arc::new(backend));
    }
    registry
}

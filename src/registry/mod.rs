//! Backend capability registry and converter selection.
//!
//! Every backend declares, per category, which source extensions it accepts
//! and which target extensions it can produce. The registry holds backends in
//! an explicit priority order fixed at construction time; selection scans
//! that order and the first capable backend wins.

pub mod index;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use formforge_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::backends::ConverterBackend;

/// Category-scoped capability tables for one backend.
///
/// A (category, extension) pair is a valid conversion source only when the
/// *same category* has a non-empty `to` set: two extensions are mutually
/// convertible through a backend only if they appear together under the same
/// category key. A presentation-only backend therefore never claims it can
/// turn a spreadsheet into a slide deck just because both extensions appear
/// somewhere in its tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    /// Category label -> accepted source extensions.
    pub from: BTreeMap<String, BTreeSet<String>>,
    /// Category label -> producible target extensions.
    pub to: BTreeMap<String, BTreeSet<String>>,
    /// Backend-specific options schema. Opaque to the core; passed through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl CapabilityDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category with its source and target extension lists.
    pub fn category(mut self, name: &str, from: &[&str], to: &[&str]) -> Self {
        self.from.insert(
            name.to_string(),
            from.iter().map(|s| s.to_string()).collect(),
        );
        self.to
            .insert(name.to_string(), to.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Attach an opaque options schema.
    pub fn options(mut self, schema: serde_json::Value) -> Self {
        self.options = Some(schema);
        self
    }

    /// Whether this descriptor supports converting `source_ext` to
    /// `target_ext` within a single category.
    pub fn supports(&self, source_ext: &str, target_ext: &str) -> bool {
        self.from.iter().any(|(category, from_set)| {
            from_set.contains(source_ext)
                && self
                    .to
                    .get(category)
                    .is_some_and(|to_set| to_set.contains(target_ext))
        })
    }
}

/// A backend together with the capability descriptor it declared at
/// registration time. Selection code works exclusively against this pair and
/// never special-cases individual backends.
pub struct RegisteredBackend {
    /// Capability tables snapshotted at registration.
    pub descriptor: CapabilityDescriptor,
    /// The adapter that performs conversions.
    pub adapter: Arc<dyn ConverterBackend>,
}

impl RegisteredBackend {
    /// Backend identifier, used for explicit selection and logging.
    pub fn name(&self) -> &'static str {
        self.adapter.name()
    }
}

impl std::fmt::Debug for RegisteredBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredBackend")
            .field("name", &self.name())
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

/// Priority-ordered collection of registered backends.
///
/// Registration happens at startup only; the registry is read-only for the
/// rest of the process lifetime. The registration order is the selection
/// priority: for a conversion pair that several backends can service, the
/// earliest registered one is chosen, always.
#[derive(Default)]
pub struct BackendRegistry {
    entries: Vec<RegisteredBackend>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend at the next priority rank.
    pub fn register(&mut self, adapter: Arc<dyn ConverterBackend>) {
        let descriptor = adapter.descriptor();
        self.entries.push(RegisteredBackend {
            descriptor,
            adapter,
        });
    }

    /// Look up a backend by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredBackend> {
        self.entries.iter().find(|b| b.name() == name)
    }

    /// Iterate backends in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredBackend> {
        self.entries.iter()
    }

    /// Number of registered backends.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Select the backend for a conversion pair.
    ///
    /// An explicit backend name is authoritative: it is returned when
    /// registered regardless of what its capability tables claim (callers
    /// are trusted to have verified support beforehand). Otherwise backends
    /// are scanned in priority order and the first one whose descriptor
    /// supports the pair wins; there is no scoring and no fallback search
    /// after a match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when no backend matches, or when the
    /// explicit name is not registered.
    pub fn select(
        &self,
        source_ext: &str,
        target_ext: &str,
        explicit: Option<&str>,
    ) -> Result<&RegisteredBackend> {
        if let Some(name) = explicit {
            return self
                .get(name)
                .ok_or_else(|| Error::unsupported(source_ext, target_ext));
        }

        self.entries
            .iter()
            .find(|b| b.descriptor.supports(source_ext, target_ext))
            .ok_or_else(|| Error::unsupported(source_ext, target_ext))
    }
}

/// Construct the default backend registry.
///
/// The registration order below is the selection priority list. Changing it
/// changes which backend services ambiguous formats, so each rank is
/// deliberate:
///
/// 1. `inkscape` - vector-aware; must outrank the raster pipeline so EMF/WMF
///    and SVG sources keep their fidelity instead of being rasterized early.
/// 2. `libreoffice` - the document suite; owns office formats before the
///    generic markup converter sees them.
/// 3. `pandoc` - markup interchange for everything LibreOffice does not
///    claim (markdown, reStructuredText, notebooks).
/// 4. `imagemagick` - general raster conversion once vector handling has had
///    its chance.
/// 5. `ffmpeg` - audio/video; last because nothing else competes for its
///    extensions and a mis-scoped pair should prefer the document path.
pub fn default_registry(tools: &crate::config::ToolsConfig) -> BackendRegistry {
    use crate::backends::{
        ffmpeg::FfmpegBackend, imagemagick::ImageMagickBackend, inkscape::InkscapeBackend,
        libreoffice::LibreOfficeBackend, pandoc::PandocBackend,
    };

    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(InkscapeBackend::new(tools)));
    registry.register(Arc::new(LibreOfficeBackend::new(tools)));
    registry.register(Arc::new(PandocBackend::new(tools)));
    registry.register(Arc::new(ImageMagickBackend::new(tools)));
    registry.register(Arc::new(FfmpegBackend::new(tools)));
    registry
}

//! Derived capability index.
//!
//! [`build_index`] is a pure function over the registered descriptors,
//! invoked once during process initialization. The resulting
//! [`CapabilityIndex`] is read-only for the process lifetime and fully
//! derivable from the registry; it is never mutated independently.

use std::collections::{BTreeSet, HashMap};

use formforge_common::paths::normalize_filetype;

use crate::registry::BackendRegistry;

/// Queryable view over every backend's declared capabilities.
#[derive(Debug, Clone, Default)]
pub struct CapabilityIndex {
    /// source extension -> backend name -> reachable target extensions.
    by_extension: HashMap<String, HashMap<String, BTreeSet<String>>>,
    /// backend name -> every accepted source extension.
    all_inputs: HashMap<String, BTreeSet<String>>,
    /// backend name -> every producible target extension.
    all_targets: HashMap<String, BTreeSet<String>>,
}

/// Build the capability index from a registry.
///
/// An entry appears in `by_extension` for extension E and backend B iff some
/// category in B's descriptor lists E under `from` with a non-empty `to` set
/// under the same category. `all_inputs` and `all_targets` union extensions
/// across categories without that pairing constraint.
pub fn build_index(registry: &BackendRegistry) -> CapabilityIndex {
    let mut index = CapabilityIndex::default();

    for backend in registry.iter() {
        let name = backend.name().to_string();
        let descriptor = &backend.descriptor;

        for (category, from_set) in &descriptor.from {
            index
                .all_inputs
                .entry(name.clone())
                .or_default()
                .extend(from_set.iter().cloned());

            let Some(to_set) = descriptor.to.get(category) else {
                continue;
            };
            if to_set.is_empty() {
                continue;
            }

            for ext in from_set {
                index
                    .by_extension
                    .entry(ext.clone())
                    .or_default()
                    .entry(name.clone())
                    .or_default()
                    .extend(to_set.iter().cloned());
            }
        }

        for to_set in descriptor.to.values() {
            index
                .all_targets
                .entry(name.clone())
                .or_default()
                .extend(to_set.iter().cloned());
        }
    }

    index
}

impl CapabilityIndex {
    /// Reachable targets for a raw source extension, per backend.
    ///
    /// The extension is normalized before lookup.
    pub fn possible_targets(&self, from: &str) -> Option<&HashMap<String, BTreeSet<String>>> {
        self.by_extension.get(&normalize_filetype(from))
    }

    /// Every source extension a backend accepts.
    pub fn inputs_for(&self, backend: &str) -> Option<&BTreeSet<String>> {
        self.all_inputs.get(backend)
    }

    /// Every target extension a backend can produce.
    pub fn targets_for(&self, backend: &str) -> Option<&BTreeSet<String>> {
        self.all_targets.get(backend)
    }

    /// Sorted union of every accepted source extension across backends.
    pub fn all_inputs(&self) -> BTreeSet<String> {
        self.all_inputs.values().flatten().cloned().collect()
    }

    /// Whether any backend accepts the given source extension.
    pub fn accepts(&self, from: &str) -> bool {
        self.by_extension.contains_key(&normalize_filetype(from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::ConverterBackend;
    use crate::registry::CapabilityDescriptor;
    use async_trait::async_trait;
    use formforge_common::Result;
    use std::path::Path;
    use std::sync::Arc;

    struct FakeBackend {
        name: &'static str,
        descriptor: CapabilityDescriptor,
    }

    #[async_trait]
    impl ConverterBackend for FakeBackend {
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
            _target_path: &Path,
            _options: Option<&serde_json::Value>,
        ) -> Result<String> {
            Ok("Done".to_string())
        }
    }

    fn sample_registry() -> BackendRegistry {
        let mut registry = BackendRegistry::new();
        registry.register(Arc::new(FakeBackend {
            name: "docs",
            descriptor: CapabilityDescriptor::new()
                .category("text", &["docx", "odt"], &["pdf", "html"])
                .category("calc", &["xlsx"], &[]),
        }));
        registry.register(Arc::new(FakeBackend {
            name: "images",
            descriptor: CapabilityDescriptor::new()
                .category("image", &["png", "jpeg"], &["webp"]),
        }));
        registry
    }

    #[test]
    fn by_extension_requires_nonempty_to_in_same_category() {
        let index = build_index(&sample_registry());

        let targets = index.possible_targets("docx").unwrap();
        assert_eq!(
            targets
                .get("docs")
                .unwrap()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>(),
            ["html", "pdf"]
        );

        // xlsx is accepted by the calc category, but that category has no
        // targets, so it never appears in the by-extension index.
        assert!(index.possible_targets("xlsx").is_none());
        assert!(!index.accepts("xlsx"));
    }

    #[test]
    fn possible_targets_normalizes_lookup() {
        let index = build_index(&sample_registry());
        // jpg normalizes to jpeg before the lookup.
        assert!(index.possible_targets("jpg").is_some());
        assert!(index.possible_targets("JPG").is_some());
    }

    #[test]
    fn all_inputs_unions_every_category() {
        let index = build_index(&sample_registry());

        // xlsx shows up in all_inputs even though its category has no targets.
        let inputs = index.inputs_for("docs").unwrap();
        assert!(inputs.contains("xlsx"));
        assert!(inputs.contains("docx"));

        let union = index.all_inputs();
        assert!(union.contains("png"));
        assert!(union.contains("odt"));
    }

    #[test]
    fn all_targets_per_backend() {
        let index = build_index(&sample_registry());
        let targets = index.targets_for("images").unwrap();
        assert_eq!(
            targets.iter().map(String::as_str).collect::<Vec<_>>(),
            ["webp"]
        );
    }

    #[test]
    fn index_is_pure_over_registry() {
        let registry = sample_registry();
        let a = build_index(&registry);
        let b = build_index(&registry);
        assert_eq!(a.all_inputs(), b.all_inputs());
        assert_eq!(
            a.possible_targets("docx").map(|t| t.len()),
            b.possible_targets("docx").map(|t| t.len())
        );
    }
}

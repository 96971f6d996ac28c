//! Integration tests for the default registry and capability index.

use formforge::config::ToolsConfig;
use formforge::registry::{default_registry, index::build_index};
use formforge_common::Error;

#[test]
fn default_priority_order_is_stable() {
    let registry = default_registry(&ToolsConfig::default());
    let names: Vec<_> = registry.iter().map(|b| b.name()).collect();
    assert_eq!(
        names,
        ["inkscape", "libreoffice", "pandoc", "imagemagick", "ffmpeg"]
    );
}

#[test]
fn ambiguous_vector_formats_prefer_inkscape() {
    let registry = default_registry(&ToolsConfig::default());

    // Both inkscape and imagemagick claim svg -> png; the vector-aware
    // backend is registered first and must win.
    let chosen = registry.select("svg", "png", None).unwrap();
    assert_eq!(chosen.name(), "inkscape");

    // A purely raster pair falls through to imagemagick.
    let chosen = registry.select("png", "webp", None).unwrap();
    assert_eq!(chosen.name(), "imagemagick");
}

#[test]
fn document_and_media_pairs_route_to_their_backends() {
    let registry = default_registry(&ToolsConfig::default());

    assert_eq!(registry.select("docx", "pdf", None).unwrap().name(), "libreoffice");
    assert_eq!(registry.select("md", "html", None).unwrap().name(), "pandoc");
    assert_eq!(registry.select("mkv", "mp4", None).unwrap().name(), "ffmpeg");
    assert_eq!(registry.select("flac", "ogg", None).unwrap().name(), "ffmpeg");
}

#[test]
fn cross_category_pairs_are_unsupported() {
    let registry = default_registry(&ToolsConfig::default());

    // ffmpeg knows flac (audio) and mp4 (video) but never across categories,
    // and no other backend claims the pair.
    let err = registry.select("flac", "mp4", None).unwrap_err();
    assert!(matches!(err, Error::Unsupported { .. }));
}

#[test]
fn explicit_backend_wins_over_index_search() {
    let registry = default_registry(&ToolsConfig::default());

    // svg -> png would select inkscape; the override forces imagemagick.
    let chosen = registry.select("svg", "png", Some("imagemagick")).unwrap();
    assert_eq!(chosen.name(), "imagemagick");

    // The override is honored even for pairs the backend does not declare.
    let chosen = registry.select("docx", "mp3", Some("ffmpeg")).unwrap();
    assert_eq!(chosen.name(), "ffmpeg");
}

#[test]
fn selection_is_repeatable() {
    let registry = default_registry(&ToolsConfig::default());
    let first = registry.select("svg", "pdf", None).unwrap().name();
    for _ in 0..20 {
        assert_eq!(registry.select("svg", "pdf", None).unwrap().name(), first);
    }
}

#[test]
fn index_lists_every_backend_for_a_source_extension() {
    let registry = default_registry(&ToolsConfig::default());
    let index = build_index(&registry);

    // docx is accepted by both the office suite and pandoc.
    let targets = index.possible_targets("docx").unwrap();
    assert!(targets.contains_key("libreoffice"));
    assert!(targets.contains_key("pandoc"));
    assert!(targets.get("libreoffice").unwrap().contains("pdf"));

    // Lookup normalizes raw extensions.
    assert!(index.possible_targets("JPG").is_some());
}

#[test]
fn index_inputs_and_targets_union_categories() {
    let registry = default_registry(&ToolsConfig::default());
    let index = build_index(&registry);

    let ffmpeg_inputs = index.inputs_for("ffmpeg").unwrap();
    assert!(ffmpeg_inputs.contains("mkv"));
    assert!(ffmpeg_inputs.contains("flac"));

    let ffmpeg_targets = index.targets_for("ffmpeg").unwrap();
    assert!(ffmpeg_targets.contains("mp4"));
    assert!(ffmpeg_targets.contains("ogg"));

    let union = index.all_inputs();
    assert!(union.contains("svg"));
    assert!(union.contains("docx"));
    assert!(union.contains("png"));
}

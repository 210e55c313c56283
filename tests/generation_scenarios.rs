//! End-to-end generation scenarios
//!
//! Vendor defaults and options files from tests/fixtures run through the
//! full pipeline: patch, merge, render, write.

mod fixtures;

use pwconf::config::ConfigOrigin;
use pwconf::patch::{PROTOCOL_NATIVE_MODULE, PROTOCOL_NATIVE_PRIORITY};
use pwconf::{
    apply_patches, deployment_patches, generate, GenerationSummary, GeneratorOptions,
    NamedDocument, PipelineError, VendorDefaults,
};
use pwconf_tree::{merge, to_spa_json, ConfigTree};
use std::fs;
use tempfile::TempDir;

fn fixture_defaults() -> VendorDefaults {
    VendorDefaults::from_dir(&fixtures::defaults_dir()).expect("fixture defaults load")
}

fn fixture_options(name: &str) -> GeneratorOptions {
    let (options, _) =
        GeneratorOptions::from_file(&fixtures::options_path(name)).expect("fixture options load");
    options
}

// =============================================================================
// Protocol-native pinning
// =============================================================================

#[test]
fn test_protocol_native_renders_before_profiler() {
    let generation = generate(&GeneratorOptions::default(), &fixture_defaults()).unwrap();

    for document in NamedDocument::ALL {
        let text = generation.document(document).unwrap();
        assert!(
            text.contains(
                "context.modules = {libpipewire-module-protocol-native = {} libpipewire-module-profiler = {}}"
            ),
            "{} rendered:\n{}",
            document,
            text
        );
    }
}

#[test]
fn test_policy_constants() {
    assert_eq!(PROTOCOL_NATIVE_MODULE, "libpipewire-module-protocol-native");
    assert_eq!(PROTOCOL_NATIVE_PRIORITY, -100);
}

// =============================================================================
// Session manager exec directive
// =============================================================================

#[test]
fn test_exec_directive_replaced() {
    let generation = generate(&fixture_options("full.toml"), &fixture_defaults()).unwrap();
    let text = generation.document(NamedDocument::Pipewire).unwrap();

    let exec_lines: Vec<_> = text.lines().filter(|l| l.starts_with("context.exec")).collect();
    assert_eq!(exec_lines, vec!["context.exec = {/path/to/session-manager = {args = \"-p foo\"}}"]);
    assert!(!text.contains("pipewire-media-session"));
}

#[test]
fn test_exec_directive_without_arguments() {
    let generation = generate(&GeneratorOptions::default(), &fixture_defaults()).unwrap();
    let text = generation.document(NamedDocument::Pipewire).unwrap();

    let exec_lines: Vec<_> = text.lines().filter(|l| l.starts_with("context.exec")).collect();
    assert_eq!(exec_lines, vec!["context.exec = {/usr/bin/pipewire-media-session = {args = \"\"}}"]);
    assert!(!text.contains("-d"));
}

#[test]
fn test_exec_directive_only_in_main_document() {
    let generation = generate(&fixture_options("full.toml"), &fixture_defaults()).unwrap();

    for document in NamedDocument::ALL {
        let text = generation.document(document).unwrap();
        assert_eq!(
            text.contains("context.exec"),
            document == NamedDocument::Pipewire,
            "{}",
            document
        );
    }
}

// =============================================================================
// User overrides
// =============================================================================

#[test]
fn test_full_options_render_exactly() {
    let generation = generate(&fixture_options("full.toml"), &fixture_defaults()).unwrap();

    assert_eq!(
        generation.document(NamedDocument::Pipewire).unwrap(),
        "context.properties = {link.max-buffers = 64 core.daemon = true default.clock.rate = 48000}\n\
         context.modules = {libpipewire-module-protocol-native = {} libpipewire-module-profiler = {}}\n\
         context.exec = {/path/to/session-manager = {args = \"-p foo\"}}\n"
    );
    assert_eq!(
        generation.document(NamedDocument::ClientRt).unwrap(),
        "context.properties = {log.level = 0}\n\
         context.modules = {libpipewire-module-protocol-native = {} libpipewire-module-profiler = {}}\n\
         stream.properties = {node.latency = \"64/48000\" resample.quality = 4}\n"
    );
}

#[test]
fn test_empty_overrides_match_patched_defaults() {
    let defaults = fixture_defaults();
    let options = GeneratorOptions::default();
    let generation = generate(&options, &defaults).unwrap();

    for document in NamedDocument::ALL {
        let ops = deployment_patches(document, &options.session_manager);
        let patched = apply_patches(defaults.document(document), &ops).unwrap();
        let expected = to_spa_json(&patched).unwrap();

        assert_eq!(generation.document(document).unwrap(), expected, "{}", document);
        assert_eq!(to_spa_json(&merge(patched.clone(), ConfigTree::new())).unwrap(), expected);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let defaults = fixture_defaults();
    let options = fixture_options("full.toml");

    let first = generate(&options, &defaults).unwrap();
    let second = generate(&options, &defaults).unwrap();
    assert_eq!(first.files, second.files);
}

// =============================================================================
// ALSA snippet
// =============================================================================

#[test]
fn test_alsa_snippet_with_32bit_plugins() {
    let dir = TempDir::new().unwrap();
    let generation = generate(&fixture_options("full.toml"), &fixture_defaults()).unwrap();
    assert!(generation.alsa_32bit);

    generation.write_to(dir.path()).unwrap();
    let snippet = fs::read_to_string(dir.path().join("alsa/conf.d/49-pipewire-modules.conf")).unwrap();

    assert_eq!(
        snippet,
        "pcm_type.pipewire {\n\
         \x20 libs.native = /usr/lib/alsa-lib/libasound_module_pcm_pipewire.so ;\n\
         \x20 libs.32Bit = /usr/lib32/alsa-lib/libasound_module_pcm_pipewire.so ;\n\
         }\n\
         ctl_type.pipewire {\n\
         \x20 libs.native = /usr/lib/alsa-lib/libasound_module_ctl_pipewire.so ;\n\
         \x20 libs.32Bit = /usr/lib32/alsa-lib/libasound_module_ctl_pipewire.so ;\n\
         }\n"
    );
}

#[test]
fn test_no_alsa_snippet_without_alsa() {
    let dir = TempDir::new().unwrap();
    let generation = generate(&GeneratorOptions::default(), &fixture_defaults()).unwrap();
    generation.write_to(dir.path()).unwrap();

    assert!(!dir.path().join("alsa").exists());
    assert_eq!(fs::read_dir(dir.path().join("pipewire")).unwrap().count(), 5);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_conflicting_options_rejected() {
    let err = GeneratorOptions::from_file(&fixtures::options_path("conflicting.toml")).unwrap_err();
    assert!(err.to_string().contains("PulseAudio"));
}

#[test]
fn test_unrenderable_override_aborts_whole_run() {
    let options = fixture_options("bad-override.toml");
    let err = generate(&options, &fixture_defaults()).unwrap_err();

    match &err {
        PipelineError::Format { document, .. } => assert_eq!(*document, NamedDocument::Jack),
        other => panic!("unexpected error: {}", other),
    }
    assert!(err.to_string().contains("\"context.properties\".\"clock.rate\""));
}

#[test]
fn test_missing_defaults_dir() {
    let dir = TempDir::new().unwrap();
    let err = VendorDefaults::from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("client"));
}

#[test]
fn test_disabled_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let generation = generate(&fixture_options("disabled.toml"), &fixture_defaults()).unwrap();

    let written = generation.write_to(dir.path()).unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

// =============================================================================
// Summary
// =============================================================================

#[test]
fn test_summary_records_sources_and_outputs() {
    let dir = TempDir::new().unwrap();
    let defaults = fixture_defaults();
    let (options, options_source) =
        GeneratorOptions::from_file(&fixtures::options_path("full.toml")).unwrap();

    let generation = generate(&options, &defaults).unwrap();
    let written = generation.write_to(dir.path()).unwrap();

    let mut sources = defaults.sources().to_vec();
    sources.push(options_source);
    let summary = GenerationSummary::new(&generation, sources, written);

    assert_eq!(summary.sources.len(), 6);
    assert!(summary.sources[..5].iter().all(|s| s.origin == ConfigOrigin::Defaults));
    assert_eq!(summary.sources[5].origin, ConfigOrigin::Options);
    assert_eq!(summary.files.len(), 6);
    assert_eq!(summary.written.len(), 6);
    assert!(summary.alsa_32bit);
    assert!(summary.audio_enabled);
    assert_eq!(summary.session_manager.arguments, vec!["-p", "foo"]);
}

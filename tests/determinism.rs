use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use figma_tokens::color::ColorVariableMap;
use figma_tokens::figma::nodes::FigmaNodesResponse;
use figma_tokens::model::{ButtonSet, PaletteDocument};
use figma_tokens::render::render_buttons;
use figma_tokens::walker::{parse_buttons, parse_palette, SectionFilter};
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_page(name: &str) -> FigmaNodesResponse {
    let raw = fs::read_to_string(fixture(name)).expect("fixture should read");
    serde_json::from_str(&raw).expect("fixture should parse")
}

fn palette_variables() -> ColorVariableMap {
    let palette = parse_palette(&load_page("palette_page.json"), "Palette").expect("palette");
    PaletteDocument::from_groups(&palette, None).color_variables()
}

#[test]
fn determinism_same_document_renders_identical_css() {
    let page = load_page("buttons_page.json");
    let colors = palette_variables();

    let first = parse_buttons(&page, "Buttons", SectionFilter::ReadyForDev).expect("buttons");
    let second = parse_buttons(&page, "Buttons", SectionFilter::ReadyForDev).expect("buttons");
    assert_eq!(first, second, "model extraction should be deterministic");
    assert_eq!(
        render_buttons(&first, &colors),
        render_buttons(&second, &colors),
        "button css should be deterministic"
    );
}

#[test]
fn determinism_snapshot_round_trip_preserves_css() {
    let page = load_page("buttons_page.json");
    let colors = palette_variables();
    let buttons = parse_buttons(&page, "Buttons", SectionFilter::AllSections).expect("buttons");

    let snapshot = serde_json::to_string_pretty(&buttons).expect("snapshot should serialize");
    let reloaded: ButtonSet = serde_json::from_str(&snapshot).expect("snapshot should parse");
    assert_eq!(
        render_buttons(&buttons, &colors),
        render_buttons(&reloaded, &colors),
        "css rendered from a cached snapshot should match the fresh render"
    );
}

#[test]
fn determinism_separate_cli_runs_write_identical_artifacts() {
    let outputs = (0..2)
        .map(|_| {
            let dir = tempdir().expect("tempdir should create");
            for (subcommand, page) in [("palette", "palette_page.json"), ("buttons", "buttons_page.json")] {
                let status = Command::new(env!("CARGO_BIN_EXE_figma-tokens"))
                    .current_dir(dir.path())
                    .args([subcommand, "--output-dir", "out", "--page-json"])
                    .arg(fixture(page))
                    .env_remove("RUST_LOG")
                    .output()
                    .expect("figma-tokens command should run")
                    .status;
                assert!(status.success(), "{subcommand} should succeed");
            }
            let out = dir.path().join("out");
            (
                fs::read(out.join("themes.css")).expect("themes.css"),
                fs::read(out.join("buttons.css")).expect("buttons.css"),
                fs::read(out.join("buttons.json")).expect("buttons.json"),
            )
        })
        .collect::<Vec<_>>();

    assert_eq!(outputs[0], outputs[1], "artifacts should be byte-identical across runs");
}

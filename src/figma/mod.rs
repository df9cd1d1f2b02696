pub mod client;
pub mod nodes;

use url::Url;

pub use client::FigmaClient;

/// Accepts a raw file key or a Figma `file`/`design`/`proto` URL.
pub fn parse_figma_file_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !trimmed.contains("://") && !trimmed.contains('/') {
        return Some(trimmed.to_owned());
    }

    let url = Url::parse(trimmed).ok()?;
    let path_parts = url.path_segments()?.collect::<Vec<_>>();
    let markers = ["file", "design", "proto"];
    let marker_index = path_parts
        .iter()
        .position(|segment| markers.contains(segment))?;
    path_parts
        .get(marker_index + 1)
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

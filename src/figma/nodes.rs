use indexmap::IndexMap;
use serde::Deserialize;

pub const SECTION: &str = "SECTION";
pub const FRAME: &str = "FRAME";
pub const TEXT: &str = "TEXT";
pub const SOLID: &str = "SOLID";
pub const READY_FOR_DEV: &str = "READY_FOR_DEV";

/// Response of `GET /v1/files/{key}`; only the page list is read.
#[derive(Debug, Clone, Deserialize)]
pub struct FigmaFileResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: Option<FigmaNode>,
}

/// Response of `GET /v1/files/{key}/nodes?ids=...`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FigmaNodesResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Option<IndexMap<String, Option<FigmaNodeEntry>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FigmaNodeEntry {
    pub document: FigmaNode,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub children: Vec<FigmaNode>,
    #[serde(default)]
    pub dev_status: Option<FigmaDevStatus>,
    #[serde(default)]
    pub fills: Vec<FigmaPaint>,
    #[serde(default)]
    pub strokes: Vec<FigmaPaint>,
    #[serde(default)]
    pub effects: Vec<FigmaEffect>,
    #[serde(default)]
    pub layout_mode: Option<String>,
    #[serde(default)]
    pub item_spacing: Option<f64>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,
    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub stroke_weight: Option<f64>,
    #[serde(default)]
    pub corner_radius: Option<f64>,
    #[serde(default)]
    pub style: Option<FigmaTextStyle>,
}

impl FigmaNode {
    pub fn is_type(&self, node_type: &str) -> bool {
        self.node_type == node_type
    }

    pub fn is_ready_for_dev(&self) -> bool {
        self.dev_status
            .as_ref()
            .is_some_and(|status| status.status_type == READY_FOR_DEV)
    }

    /// Auto-layout frames carry a `layoutMode` other than `NONE`.
    pub fn has_auto_layout(&self) -> bool {
        self.layout_mode
            .as_deref()
            .is_some_and(|mode| !mode.is_empty() && mode != "NONE")
    }

    pub fn children_of_type<'a>(&'a self, node_type: &'a str) -> impl Iterator<Item = &'a FigmaNode> {
        self.children
            .iter()
            .filter(move |child| child.is_type(node_type))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FigmaDevStatus {
    #[serde(rename = "type")]
    pub status_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FigmaPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<FigmaColor>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FigmaColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<FigmaColor>,
    #[serde(default)]
    pub offset: Option<FigmaVector>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FigmaVector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaTextStyle {
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height_px: Option<f64>,
}

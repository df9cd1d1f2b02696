use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::{css_variable_name, slugify, ColorVariableMap, RgbaColor};
use crate::units::{FixedPoint, PaddingBox};

/// State names that stand for the resting button.
pub const BASE_STATE_NAMES: [&str; 2] = ["default", "normal"];

/// Modifier bucket that mirrors the unmodified variant.
pub const NORMAL_MODIFIER: &str = "normal";

pub fn is_base_state(name: &str) -> bool {
    BASE_STATE_NAMES.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontInfo {
    pub font_family: Option<String>,
    pub font_weight: Option<f64>,
    /// rem
    pub font_size: FixedPoint,
    /// Unitless ratio of line height to font size.
    pub line_height: Option<FixedPoint>,
}

/// A visible Figma effect. Offsets, blur and spread stay in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Effect {
    #[serde(rename_all = "camelCase")]
    Shadow {
        color: String,
        offset_x: f64,
        offset_y: f64,
        blur: f64,
        #[serde(default)]
        spread: f64,
    },
    #[serde(rename_all = "camelCase")]
    InnerShadow {
        color: String,
        offset_x: f64,
        offset_y: f64,
        blur: f64,
        #[serde(default)]
        spread: f64,
    },
    Blur { blur: f64 },
}

/// Everything extracted for one interactive state of one button.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleState {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub gap: FixedPoint,
    #[serde(default)]
    pub border_width: FixedPoint,
    #[serde(default)]
    pub border_radius: FixedPoint,
    #[serde(default)]
    pub padding: PaddingBox,
    #[serde(default)]
    pub font: Option<FontInfo>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeStates {
    #[serde(default)]
    pub states: IndexMap<String, StyleState>,
}

impl ThemeStates {
    /// The `default` state, or `normal` when there is no `default`.
    pub fn base_state(&self) -> Option<(&str, &StyleState)> {
        BASE_STATE_NAMES.iter().find_map(|name| {
            self.states
                .get_key_value(*name)
                .map(|(key, state)| (key.as_str(), state))
        })
    }
}

/// theme name -> states, in document order.
pub type ThemeMap = IndexMap<String, ThemeStates>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonVariant {
    #[serde(default)]
    pub themes: ThemeMap,
    #[serde(default)]
    pub modifiers: IndexMap<String, ThemeMap>,
}

impl ButtonVariant {
    pub fn base_theme_name(&self) -> Option<&str> {
        self.themes.keys().next().map(String::as_str)
    }

    /// Base state of the first theme; the reference every other rule is scoped against.
    pub fn base_state(&self) -> Option<(&str, &StyleState)> {
        self.themes.values().next()?.base_state()
    }

    pub fn theme_mut(&mut self, theme: &str) -> &mut ThemeStates {
        self.themes.entry(theme.to_owned()).or_default()
    }

    pub fn modifier_theme_mut(&mut self, modifier: &str, theme: &str) -> &mut ThemeStates {
        self.modifiers
            .entry(modifier.to_owned())
            .or_default()
            .entry(theme.to_owned())
            .or_default()
    }

    /// Records an unmodified state under its theme and, as an independent copy,
    /// under the `normal` modifier.
    pub fn insert_base_state(&mut self, theme: &str, state: &str, style: StyleState) {
        self.modifier_theme_mut(NORMAL_MODIFIER, theme)
            .states
            .insert(state.to_owned(), style.clone());
        self.theme_mut(theme).states.insert(state.to_owned(), style);
    }

    pub fn insert_modifier_state(
        &mut self,
        modifier: &str,
        theme: &str,
        state: &str,
        style: StyleState,
    ) {
        self.modifier_theme_mut(modifier, theme)
            .states
            .insert(state.to_owned(), style);
    }
}

/// Every button variant on the page, keyed by variant name in document order.
/// This is also the shape of the `buttons.json` snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonSet {
    pub variants: IndexMap<String, ButtonVariant>,
}

impl ButtonSet {
    pub fn variant_mut(&mut self, name: &str) -> &mut ButtonVariant {
        self.variants.entry(name.to_owned()).or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// One swatch from the palette page.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteColor {
    pub name: String,
    pub color: RgbaColor,
}

impl PaletteColor {
    pub fn rgba(&self) -> String {
        self.color.css()
    }
}

/// Section name -> swatches, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteGroups {
    pub groups: IndexMap<String, Vec<PaletteColor>>,
}

impl PaletteGroups {
    pub fn group_mut(&mut self, name: &str) -> &mut Vec<PaletteColor> {
        self.groups.entry(name.to_owned()).or_default()
    }

    pub fn color_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub name: String,
    pub css_variable: String,
    pub rgba: String,
    pub values: RgbaColor,
}

/// The `themes.json` artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteDocument {
    #[serde(default)]
    pub groups: IndexMap<String, IndexMap<String, PaletteEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PaletteDocument {
    pub fn from_groups(palette: &PaletteGroups, timestamp: Option<String>) -> Self {
        let mut groups: IndexMap<String, IndexMap<String, PaletteEntry>> = IndexMap::new();
        for (group_name, colors) in &palette.groups {
            let group = groups.entry(slugify(group_name)).or_default();
            for color in colors {
                group.insert(
                    slugify(&color.name),
                    PaletteEntry {
                        name: color.name.clone(),
                        css_variable: css_variable_name(group_name, &color.name),
                        rgba: color.rgba(),
                        values: color.color,
                    },
                );
            }
        }
        Self { groups, timestamp }
    }

    pub fn color_variables(&self) -> ColorVariableMap {
        let mut map = ColorVariableMap::new();
        for entry in self.groups.values().flat_map(IndexMap::values) {
            map.insert(entry.rgba.clone(), entry.css_variable.clone());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{ButtonVariant, PaletteColor, PaletteDocument, PaletteGroups, StyleState};
    use crate::color::RgbaColor;

    fn red_state() -> StyleState {
        StyleState {
            background_color: Some("rgba(255, 0, 0, 1)".to_owned()),
            ..StyleState::default()
        }
    }

    #[test]
    fn normal_modifier_copy_is_independent() {
        let mut variant = ButtonVariant::default();
        variant.insert_base_state("ash-gray", "default", red_state());

        variant.themes["ash-gray"].states["default"].background_color =
            Some("rgba(0, 0, 255, 1)".to_owned());

        let normal = &variant.modifiers["normal"]["ash-gray"].states["default"];
        assert_eq!(normal.background_color.as_deref(), Some("rgba(255, 0, 0, 1)"));
    }

    #[test]
    fn base_state_prefers_default_over_normal() {
        let mut variant = ButtonVariant::default();
        variant.insert_base_state("light", "normal", StyleState::default());
        variant.insert_base_state("light", "default", red_state());
        let (name, state) = variant.base_state().expect("base state");
        assert_eq!(name, "default");
        assert_eq!(state, &red_state());
    }

    #[test]
    fn palette_document_builds_slugged_variables() {
        let mut palette = PaletteGroups::default();
        palette.group_mut("Brand Colors").push(PaletteColor {
            name: "Deep Blue".to_owned(),
            color: RgbaColor::from_unit(0.0, 0.0, 1.0, 1.0),
        });
        let document = PaletteDocument::from_groups(&palette, None);
        let entry = &document.groups["brand-colors"]["deep-blue"];
        assert_eq!(entry.css_variable, "--theme-brand-colors-deep-blue");
        assert_eq!(entry.rgba, "rgba(0, 0, 255, 1)");

        let variables = document.color_variables();
        assert_eq!(
            variables.resolve("rgba(0, 0, 255, 1)"),
            "var(--theme-brand-colors-deep-blue)"
        );
    }

    #[test]
    fn effect_snapshot_uses_tagged_camel_case() {
        let effects: Vec<super::Effect> = serde_json::from_str(
            r#"[{"type":"innerShadow","color":"rgba(0, 0, 0, 0.25)","offsetX":0,"offsetY":2,"blur":4,"spread":0},{"type":"blur","blur":8}]"#,
        )
        .expect("effects");
        assert_eq!(effects.len(), 2);
        assert!(matches!(effects[1], super::Effect::Blur { blur } if blur == 8.0));
    }
}

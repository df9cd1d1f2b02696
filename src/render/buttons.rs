//! Button stylesheet rendering.
//!
//! Rule order follows the model's insertion order, which follows the design
//! document, so the same model always renders the same bytes.

use tracing::{debug, warn};

use super::CssWriter;
use crate::color::ColorVariableMap;
use crate::diff::{affects_colors, style_differences, Declaration};
use crate::model::{is_base_state, ButtonSet, ButtonVariant, Effect, StyleState, NORMAL_MODIFIER};
use crate::units::{format_number, px_to_rem};

pub const TRANSITION: &str = "all 0.2s ease-in-out";

pub fn render_buttons(buttons: &ButtonSet, colors: &ColorVariableMap) -> String {
    let mut writer = CssWriter::default();
    for (name, variant) in &buttons.variants {
        render_variant(&mut writer, name, variant, colors);
    }
    writer.finish()
}

fn render_variant(
    writer: &mut CssWriter,
    name: &str,
    variant: &ButtonVariant,
    colors: &ColorVariableMap,
) {
    let (Some(base_theme), Some((_, base_state))) = (variant.base_theme_name(), variant.base_state())
    else {
        warn!(variant = name, "no default or normal state in the first theme, skipping");
        return;
    };

    let root = format!(".{name}");
    writer.rule(&root, &base_declarations(base_state, colors));

    for (theme, theme_states) in &variant.themes {
        for (state, style) in &theme_states.states {
            if theme == base_theme && is_base_state(state) {
                continue;
            }
            let selector = scoped_selector(&root, theme, base_theme, state);
            writer.rule_if_any(&selector, &color_declarations(style, colors));
        }
    }

    for (modifier, modifier_themes) in &variant.modifiers {
        if modifier == NORMAL_MODIFIER {
            continue;
        }
        let Some((_, modifier_base)) = modifier_themes
            .values()
            .next()
            .and_then(|theme| theme.base_state())
        else {
            debug!(variant = name, modifier = %modifier, "modifier has no base state");
            continue;
        };

        let modifier_root = format!("{root}[mod=\"{modifier}\"]");
        let diff = style_differences(base_state, modifier_base);
        if diff.has_differences() {
            writer.rule(&modifier_root, &diff.declarations);
        }

        if affects_colors(base_state, modifier_base) {
            for (theme, theme_states) in modifier_themes {
                for (state, style) in &theme_states.states {
                    let selector = scoped_selector(&modifier_root, theme, base_theme, state);
                    writer.rule_if_any(&selector, &color_declarations(style, colors));
                }
            }
        }
    }
}

/// `root` + `[theme="…"]` off the base theme + `:state` off the base state.
pub fn scoped_selector(root: &str, theme: &str, base_theme: &str, state: &str) -> String {
    let mut selector = root.to_owned();
    if theme != base_theme {
        selector.push_str(&format!("[theme=\"{theme}\"]"));
    }
    if !is_base_state(state) {
        selector.push(':');
        selector.push_str(state);
    }
    selector
}

/// Full declaration block for the variant's resting state.
pub fn base_declarations(state: &StyleState, colors: &ColorVariableMap) -> Vec<Declaration> {
    let mut declarations = Vec::new();

    if let Some(background) = &state.background_color {
        declarations.push(Declaration::new("background-color", colors.resolve(background)));
    }
    if let Some(border) = &state.border_color {
        declarations.push(Declaration::new("border-color", colors.resolve(border)));
    }
    if !state.border_width.is_zero() {
        declarations.push(Declaration::new("border-width", state.border_width.to_rem()));
    }
    if !state.border_radius.is_zero() {
        declarations.push(Declaration::new("border-radius", state.border_radius.to_rem()));
    }
    declarations.push(Declaration::new("border-style", "solid"));
    declarations.push(Declaration::new("padding", state.padding.to_shorthand()));
    declarations.push(Declaration::new("display", "inline-flex"));
    declarations.push(Declaration::new("align-items", "center"));
    declarations.push(Declaration::new("justify-content", "center"));
    if !state.gap.is_zero() {
        declarations.push(Declaration::new("gap", state.gap.to_rem()));
    }

    if let Some(font) = &state.font {
        if let Some(family) = font.font_family.as_deref().filter(|family| !family.is_empty()) {
            declarations.push(Declaration::new("font-family", family));
        }
        if let Some(weight) = font.font_weight.filter(|weight| *weight != 0.0) {
            declarations.push(Declaration::new("font-weight", format_number(weight)));
        }
        if !font.font_size.is_zero() {
            declarations.push(Declaration::new("font-size", font.font_size.to_rem()));
        }
        if let Some(line_height) = &font.line_height {
            declarations.push(Declaration::new("line-height", line_height.to_plain()));
        }
    }

    if let Some(text) = &state.text_color {
        declarations.push(Declaration::new("color", colors.resolve(text)));
    }
    declarations.extend(effect_declarations(&state.effects, colors));
    declarations.push(Declaration::new("transition", TRANSITION));

    declarations
}

/// Colors and effects only; geometry is carried by the base rule.
pub fn color_declarations(state: &StyleState, colors: &ColorVariableMap) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    if let Some(background) = &state.background_color {
        declarations.push(Declaration::new("background-color", colors.resolve(background)));
    }
    if let Some(border) = &state.border_color {
        declarations.push(Declaration::new("border-color", colors.resolve(border)));
    }
    if let Some(text) = &state.text_color {
        declarations.push(Declaration::new("color", colors.resolve(text)));
    }
    declarations.extend(effect_declarations(&state.effects, colors));
    declarations
}

/// `box-shadow` from (inner) shadows and `filter` from layer blurs.
pub fn effect_declarations(effects: &[Effect], colors: &ColorVariableMap) -> Vec<Declaration> {
    let mut shadows = Vec::new();
    let mut filters = Vec::new();

    for effect in effects {
        match effect {
            Effect::Shadow {
                color,
                offset_x,
                offset_y,
                blur,
                spread,
            } => shadows.push(shadow_value(
                "",
                *offset_x,
                *offset_y,
                *blur,
                *spread,
                &colors.resolve(color),
            )),
            Effect::InnerShadow {
                color,
                offset_x,
                offset_y,
                blur,
                spread,
            } => shadows.push(shadow_value(
                "inset ",
                *offset_x,
                *offset_y,
                *blur,
                *spread,
                &colors.resolve(color),
            )),
            Effect::Blur { blur } => filters.push(format!("blur({})", px_to_rem(*blur))),
        }
    }

    let mut declarations = Vec::new();
    if !shadows.is_empty() {
        declarations.push(Declaration::new("box-shadow", shadows.join(", ")));
    }
    if !filters.is_empty() {
        declarations.push(Declaration::new("filter", filters.join(" ")));
    }
    declarations
}

fn shadow_value(
    prefix: &str,
    offset_x: f64,
    offset_y: f64,
    blur: f64,
    spread: f64,
    color: &str,
) -> String {
    format!(
        "{prefix}{} {} {} {} {color}",
        px_to_rem(offset_x),
        px_to_rem(offset_y),
        px_to_rem(blur),
        px_to_rem(spread)
    )
}

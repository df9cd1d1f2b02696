//! Per-node style readers. Missing optional properties produce empty values,
//! never errors.

use crate::color::RgbaColor;
use crate::figma::nodes::{FigmaEffect, FigmaNode, FigmaPaint, FigmaTextStyle, SOLID, TEXT};
use crate::model::{Effect, FontInfo, StyleState};
use crate::units::{FixedPoint, PaddingBox};

pub fn paint_color(paint: &FigmaPaint) -> Option<RgbaColor> {
    let color = paint.color?;
    Some(RgbaColor::from_unit(
        color.r,
        color.g,
        color.b,
        paint.opacity.unwrap_or(1.0),
    ))
}

fn first_solid(paints: &[FigmaPaint]) -> Option<String> {
    paints
        .iter()
        .find(|paint| paint.paint_type == SOLID)
        .and_then(paint_color)
        .map(|color| color.css())
}

pub fn background_color(node: Option<&FigmaNode>) -> Option<String> {
    first_solid(&node?.fills)
}

pub fn border_color(node: Option<&FigmaNode>) -> Option<String> {
    first_solid(&node?.strokes)
}

/// Text nodes paint glyphs with their fills.
pub fn text_color(text: Option<&FigmaNode>) -> Option<String> {
    first_solid(&text?.fills)
}

pub fn layout_gap(node: Option<&FigmaNode>) -> FixedPoint {
    match node {
        Some(node) if node.has_auto_layout() => {
            FixedPoint::from_px(node.item_spacing.unwrap_or(0.0))
        }
        _ => FixedPoint::zero(),
    }
}

pub fn border_width(node: Option<&FigmaNode>) -> FixedPoint {
    px_or_zero(node.and_then(|node| node.stroke_weight))
}

pub fn border_radius(node: Option<&FigmaNode>) -> FixedPoint {
    px_or_zero(node.and_then(|node| node.corner_radius))
}

fn px_or_zero(px: Option<f64>) -> FixedPoint {
    match px {
        Some(px) if px != 0.0 && px.is_finite() => FixedPoint::from_px(px),
        _ => FixedPoint::zero(),
    }
}

pub fn padding(node: Option<&FigmaNode>) -> PaddingBox {
    match node {
        Some(node) if node.has_auto_layout() => PaddingBox::from_px(
            node.padding_top.unwrap_or(0.0),
            node.padding_right.unwrap_or(0.0),
            node.padding_bottom.unwrap_or(0.0),
            node.padding_left.unwrap_or(0.0),
        ),
        _ => PaddingBox::default(),
    }
}

pub fn font_info(text: Option<&FigmaNode>) -> Option<FontInfo> {
    text?.style.as_ref().and_then(font_from_style)
}

fn font_from_style(style: &FigmaTextStyle) -> Option<FontInfo> {
    let font_size_px = style.font_size.filter(|size| *size > 0.0)?;
    let line_height = style
        .line_height_px
        .filter(|px| *px != 0.0)
        .map(|px| FixedPoint::new(px / font_size_px));

    Some(FontInfo {
        font_family: style.font_family.clone(),
        font_weight: style.font_weight,
        font_size: FixedPoint::from_px(font_size_px),
        line_height,
    })
}

/// Visible effects in source order; unknown effect types are dropped.
pub fn effects(node: Option<&FigmaNode>) -> Vec<Effect> {
    let Some(node) = node else {
        return Vec::new();
    };
    node.effects
        .iter()
        .filter(|effect| effect.visible)
        .filter_map(convert_effect)
        .collect()
}

fn convert_effect(effect: &FigmaEffect) -> Option<Effect> {
    match effect.effect_type.as_str() {
        "DROP_SHADOW" | "INNER_SHADOW" => {
            let color = effect
                .color
                .map(|color| RgbaColor::from_unit(color.r, color.g, color.b, color.a))
                .unwrap_or_else(|| RgbaColor::from_unit(0.0, 0.0, 0.0, 1.0))
                .css();
            let offset = effect.offset.unwrap_or_default();
            let spread = effect.spread.unwrap_or(0.0);
            if effect.effect_type == "DROP_SHADOW" {
                Some(Effect::Shadow {
                    color,
                    offset_x: offset.x,
                    offset_y: offset.y,
                    blur: effect.radius,
                    spread,
                })
            } else {
                Some(Effect::InnerShadow {
                    color,
                    offset_x: offset.x,
                    offset_y: offset.y,
                    blur: effect.radius,
                    spread,
                })
            }
        }
        "LAYER_BLUR" => Some(Effect::Blur {
            blur: effect.radius,
        }),
        _ => None,
    }
}

/// First direct `TEXT` child; nested labels are not searched.
pub fn find_text_node(frame: &FigmaNode) -> Option<&FigmaNode> {
    frame.children.iter().find(|child| child.is_type(TEXT))
}

/// Full style bundle for a state frame, reading text color and font from its label.
pub fn style_state(frame: &FigmaNode) -> StyleState {
    let text = find_text_node(frame);
    let frame = Some(frame);
    StyleState {
        background_color: background_color(frame),
        border_color: border_color(frame),
        text_color: text_color(text),
        gap: layout_gap(frame),
        border_width: border_width(frame),
        border_radius: border_radius(frame),
        padding: padding(frame),
        font: font_info(text),
        effects: effects(frame),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        background_color, border_radius, border_width, effects, font_info, layout_gap, padding,
        style_state,
    };
    use crate::figma::nodes::FigmaNode;
    use crate::model::Effect;

    fn node(json: &str) -> FigmaNode {
        serde_json::from_str(json).expect("fixture node should parse")
    }

    #[test]
    fn missing_node_yields_empty_values() {
        assert_eq!(background_color(None), None);
        assert!(layout_gap(None).is_zero());
        assert!(border_width(None).is_zero());
        assert!(effects(None).is_empty());
        assert_eq!(font_info(None), None);
        assert_eq!(padding(None).to_shorthand(), "0rem");
    }

    #[test]
    fn background_skips_non_solid_paints() {
        let frame = node(
            r#"{"type":"FRAME","fills":[
                {"type":"GRADIENT_LINEAR"},
                {"type":"SOLID","color":{"r":1,"g":1,"b":1,"a":1},"opacity":0.5}
            ]}"#,
        );
        assert_eq!(
            background_color(Some(&frame)).as_deref(),
            Some("rgba(255, 255, 255, 0.5)")
        );

        let image_only = node(r#"{"type":"FRAME","fills":[{"type":"IMAGE"}]}"#);
        assert_eq!(background_color(Some(&image_only)), None);
    }

    #[test]
    fn paint_visibility_flag_is_not_consulted() {
        let frame = node(
            r#"{"type":"FRAME","fills":[
                {"type":"SOLID","visible":false,"color":{"r":0,"g":0,"b":0,"a":1}}
            ]}"#,
        );
        assert_eq!(
            background_color(Some(&frame)).as_deref(),
            Some("rgba(0, 0, 0, 1)")
        );
    }

    #[test]
    fn layout_values_need_auto_layout() {
        let fixed = node(r#"{"type":"FRAME","itemSpacing":8,"paddingTop":12}"#);
        assert!(layout_gap(Some(&fixed)).is_zero());
        assert!(padding(Some(&fixed)).top.is_zero());

        let auto = node(
            r#"{"type":"FRAME","layoutMode":"HORIZONTAL","itemSpacing":8,
                "paddingTop":12,"paddingRight":24,"paddingBottom":12,"paddingLeft":24}"#,
        );
        assert_eq!(layout_gap(Some(&auto)).as_str(), "0.500");
        assert_eq!(padding(Some(&auto)).to_shorthand(), "0.75rem 1.5rem");
    }

    #[test]
    fn stroke_and_radius_convert_to_rem() {
        let frame = node(r#"{"type":"FRAME","strokeWeight":1,"cornerRadius":8}"#);
        assert_eq!(border_width(Some(&frame)).as_str(), "0.063");
        assert_eq!(border_radius(Some(&frame)).to_rem(), "0.5rem");
    }

    #[test]
    fn font_info_derives_unitless_line_height() {
        let text = node(
            r#"{"type":"TEXT","style":{"fontFamily":"Inter","fontWeight":500,"fontSize":14,"lineHeightPx":20}}"#,
        );
        let font = font_info(Some(&text)).expect("font info");
        assert_eq!(font.font_family.as_deref(), Some("Inter"));
        assert_eq!(font.font_size.as_str(), "0.875");
        assert_eq!(font.line_height.as_ref().map(|lh| lh.as_str()), Some("1.429"));

        let no_line_height =
            node(r#"{"type":"TEXT","style":{"fontFamily":"Inter","fontSize":16}}"#);
        let font = font_info(Some(&no_line_height)).expect("font info");
        assert_eq!(font.line_height, None);
    }

    #[test]
    fn effects_keep_visible_known_entries_in_order() {
        let frame = node(
            r#"{"type":"FRAME","effects":[
                {"type":"DROP_SHADOW","visible":true,"color":{"r":0,"g":0,"b":0,"a":0.25},"offset":{"x":0,"y":4},"radius":8},
                {"type":"BACKGROUND_BLUR","visible":true,"radius":3},
                {"type":"INNER_SHADOW","visible":false,"color":{"r":0,"g":0,"b":0,"a":1},"offset":{"x":0,"y":1},"radius":1},
                {"type":"LAYER_BLUR","visible":true,"radius":2}
            ]}"#,
        );
        let extracted = effects(Some(&frame));
        assert_eq!(
            extracted,
            vec![
                Effect::Shadow {
                    color: "rgba(0, 0, 0, 0.25)".to_owned(),
                    offset_x: 0.0,
                    offset_y: 4.0,
                    blur: 8.0,
                    spread: 0.0,
                },
                Effect::Blur { blur: 2.0 },
            ]
        );
    }

    #[test]
    fn style_state_reads_label_from_first_text_child() {
        let frame = node(
            r#"{"type":"FRAME","name":"default","children":[
                {"type":"RECTANGLE","fills":[{"type":"SOLID","color":{"r":1,"g":0,"b":0}}]},
                {"type":"TEXT","fills":[{"type":"SOLID","color":{"r":0,"g":0,"b":0}}],
                 "style":{"fontFamily":"Inter","fontWeight":600,"fontSize":16,"lineHeightPx":24}}
            ]}"#,
        );
        let state = style_state(&frame);
        assert_eq!(state.background_color, None);
        assert_eq!(state.text_color.as_deref(), Some("rgba(0, 0, 0, 1)"));
        assert_eq!(
            state.font.and_then(|font| font.line_height).map(|lh| lh.to_plain()),
            Some("1.5".to_owned())
        );
    }
}

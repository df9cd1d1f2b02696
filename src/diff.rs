use crate::model::{FontInfo, StyleState};
use crate::units::{format_number, FixedPoint};

/// One CSS declaration, rendered as `  {property}: {value};`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: &'static str,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// Non-color declarations where a modifier's base state departs from the variant's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDiff {
    pub declarations: Vec<Declaration>,
}

impl StyleDiff {
    pub fn has_differences(&self) -> bool {
        !self.declarations.is_empty()
    }

    fn push(&mut self, property: &'static str, value: impl Into<String>) {
        self.declarations.push(Declaration::new(property, value));
    }
}

/// Geometry and typography that differ beyond tolerance. Colors are left to
/// [`affects_colors`].
pub fn style_differences(base: &StyleState, modified: &StyleState) -> StyleDiff {
    let mut diff = StyleDiff::default();

    let lengths: [(&'static str, &FixedPoint, &FixedPoint); 3] = [
        ("border-radius", &base.border_radius, &modified.border_radius),
        ("border-width", &base.border_width, &modified.border_width),
        ("gap", &base.gap, &modified.gap),
    ];
    for (property, base_value, modified_value) in lengths {
        if !base_value.approx_eq(modified_value) {
            diff.push(property, modified_value.to_rem());
        }
    }

    // Any side moving re-emits the whole shorthand.
    if !base.padding.approx_eq(&modified.padding) {
        diff.push("padding", modified.padding.to_shorthand());
    }

    if let (Some(base_font), Some(modified_font)) = (&base.font, &modified.font) {
        font_differences(base_font, modified_font, &mut diff);
    }

    diff
}

fn font_differences(base: &FontInfo, modified: &FontInfo, diff: &mut StyleDiff) {
    if modified.font_family != base.font_family {
        if let Some(family) = &modified.font_family {
            diff.push("font-family", family.clone());
        }
    }
    if modified.font_weight != base.font_weight {
        if let Some(weight) = modified.font_weight {
            diff.push("font-weight", format_number(weight));
        }
    }
    if !base.font_size.approx_eq(&modified.font_size) {
        diff.push("font-size", modified.font_size.to_rem());
    }
    if let (Some(base_lh), Some(modified_lh)) = (&base.line_height, &modified.line_height) {
        if !base_lh.approx_eq(modified_lh) {
            diff.push("line-height", modified_lh.to_plain());
        }
    }
}

/// True when background, border or text color changes (canonical string inequality).
pub fn affects_colors(base: &StyleState, modified: &StyleState) -> bool {
    base.background_color != modified.background_color
        || base.border_color != modified.border_color
        || base.text_color != modified.text_color
}

#[cfg(test)]
mod tests {
    use super::{affects_colors, style_differences, Declaration};
    use crate::model::{FontInfo, StyleState};
    use crate::units::{FixedPoint, PaddingBox};

    fn base() -> StyleState {
        StyleState {
            background_color: Some("rgba(10, 10, 10, 1)".to_owned()),
            gap: FixedPoint::new(0.5),
            border_radius: FixedPoint::new(0.25),
            padding: PaddingBox::from_px(8.0, 16.0, 8.0, 16.0),
            font: Some(FontInfo {
                font_family: Some("Inter".to_owned()),
                font_weight: Some(500.0),
                font_size: FixedPoint::new(0.875),
                line_height: Some(FixedPoint::new(1.429)),
            }),
            ..StyleState::default()
        }
    }

    #[test]
    fn identical_states_have_no_differences() {
        let diff = style_differences(&base(), &base());
        assert!(!diff.has_differences());
        assert!(!affects_colors(&base(), &base()));
    }

    #[test]
    fn sub_tolerance_noise_is_ignored() {
        let mut modified = base();
        modified.gap = FixedPoint::new(0.50005);
        // Rounded back to the same three digits, then compared with tolerance.
        assert!(!style_differences(&base(), &modified).has_differences());
    }

    #[test]
    fn color_only_change_is_not_a_declaration_diff() {
        let mut modified = base();
        modified.background_color = Some("rgba(200, 0, 0, 1)".to_owned());
        assert!(!style_differences(&base(), &modified).has_differences());
        assert!(affects_colors(&base(), &modified));
    }

    #[test]
    fn one_padding_side_reemits_full_shorthand() {
        let mut modified = base();
        modified.padding.left = FixedPoint::from_px(20.0);
        let diff = style_differences(&base(), &modified);
        assert_eq!(
            diff.declarations,
            vec![Declaration::new("padding", "0.5rem 1rem 0.5rem 1.25rem")]
        );
    }

    #[test]
    fn geometry_and_font_changes_keep_fixed_order() {
        let mut modified = base();
        modified.gap = FixedPoint::new(0.75);
        modified.border_radius = FixedPoint::new(1.0);
        if let Some(font) = modified.font.as_mut() {
            font.font_weight = Some(700.0);
            font.font_size = FixedPoint::new(1.0);
            font.line_height = Some(FixedPoint::new(1.5));
        }
        let diff = style_differences(&base(), &modified);
        let properties = diff
            .declarations
            .iter()
            .map(|declaration| declaration.property)
            .collect::<Vec<_>>();
        assert_eq!(
            properties,
            vec!["border-radius", "gap", "font-weight", "font-size", "line-height"]
        );
        assert_eq!(diff.declarations[0].value, "1rem");
        assert_eq!(diff.declarations[3].value, "1rem");
        assert_eq!(diff.declarations[4].value, "1.5");
    }

    #[test]
    fn font_is_only_compared_when_both_sides_have_one() {
        let mut modified = base();
        modified.font = None;
        assert!(!style_differences(&base(), &modified).has_differences());
    }
}

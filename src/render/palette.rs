use crate::color::css_variable_name;
use crate::model::PaletteGroups;

/// `:root` block with one custom property per swatch, grouped under comments.
pub fn render_palette(palette: &PaletteGroups) -> String {
    let mut css = String::from(":root {\n");
    for (group, colors) in &palette.groups {
        css.push_str(&format!("\n  /* {group} */\n"));
        for color in colors {
            css.push_str(&format!(
                "  {}: {};\n",
                css_variable_name(group, &color.name),
                color.rgba()
            ));
        }
    }
    css.push_str("}\n");
    css
}

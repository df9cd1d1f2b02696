pub mod buttons;
pub mod palette;

pub use buttons::render_buttons;
pub use palette::render_palette;

use crate::diff::Declaration;

/// Append-only stylesheet buffer. Each rule is followed by a blank line.
#[derive(Debug, Default)]
pub(crate) struct CssWriter {
    out: String,
}

impl CssWriter {
    pub(crate) fn rule(&mut self, selector: &str, declarations: &[Declaration]) {
        self.out.push_str(selector);
        self.out.push_str(" {\n");
        for declaration in declarations {
            self.out.push_str("  ");
            self.out.push_str(declaration.property);
            self.out.push_str(": ");
            self.out.push_str(&declaration.value);
            self.out.push_str(";\n");
        }
        self.out.push_str("}\n\n");
    }

    /// Like [`CssWriter::rule`], but a rule with no declarations is dropped.
    pub(crate) fn rule_if_any(&mut self, selector: &str, declarations: &[Declaration]) {
        if !declarations.is_empty() {
            self.rule(selector, declarations);
        }
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

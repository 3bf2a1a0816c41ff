use crate::registry::{FontFormat, FontName};
use crate::resource::ResourceHandle;

/// Escapes a family name for use inside a single-quoted CSS string.
fn escape_family(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The `font-family` declaration that identifies a binding for `family`.
pub fn family_declaration(family: &str) -> String {
    format!("font-family: '{}'", escape_family(family))
}

/// Returns true if the rule text declares a font face for `family`.
pub fn binds_family(rule: &str, family: &str) -> bool {
    rule.contains(&family_declaration(family))
}

/// An `@font-face` rule binding a family name to a resource handle.
#[derive(Debug, Clone)]
pub struct FontFaceRule<'a> {
    pub family: &'a FontName,
    pub source: &'a ResourceHandle,
    pub format: &'a FontFormat,
}

impl<'a> FontFaceRule<'a> {
    pub fn new(family: &'a FontName, source: &'a ResourceHandle, format: &'a FontFormat) -> Self {
        Self {
            family,
            source,
            format,
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "@font-face {{\n  {};\n  src: url('{}') format('{}');\n}}",
            family_declaration(self.family),
            self.source,
            self.format
        )
    }
}

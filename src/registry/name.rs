use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

use compact_str::CompactString;

/// Font-family name derived from an uploaded file.
///
/// Used both as the label shown to the application and as the family name
/// handed to the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontName(CompactString);

impl FontName {
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for FontName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for FontName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for FontName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FontName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl From<&str> for FontName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Strips the final `.ext` from a file name.
///
/// The extension must be at least one character long and may not contain
/// `.` or `/`, so `archive.tar.gz` keeps `archive.tar` and `trailing.` is
/// left untouched. An empty result is returned as-is; the caller decides
/// whether that is an error.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(dot) => {
            let ext = &file_name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..dot]
            }
        }
        None => file_name,
    }
}

/// Derives the family name for an uploaded file, or `None` when nothing is
/// left after stripping the extension.
pub fn derive_font_name(file_name: &str) -> Option<FontName> {
    let stem = strip_extension(file_name);
    if stem.is_empty() {
        None
    } else {
        Some(FontName::new(stem))
    }
}

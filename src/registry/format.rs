use std::fmt;

use compact_str::CompactString;

/// `format(...)` hint for an `@font-face` source, taken from the MIME subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFormat(CompactString);

/// RFC 6838 caps restricted names at 127 characters.
const MAX_SUBTYPE_LEN: usize = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimeError {
    Missing,
    Unparseable,
}

impl FontFormat {
    /// Parses `type/subtype[; params]` and keeps the subtype.
    ///
    /// The top-level type is not checked: `application/x-font-ttf` yields
    /// `x-font-ttf`. The subtype must be an RFC 6838 restricted name, since it
    /// is written verbatim into the `@font-face` rule.
    pub fn from_mime(mime: &str) -> Result<Self, MimeError> {
        let mime = mime.trim();
        if mime.is_empty() {
            return Err(MimeError::Missing);
        }

        let (_, rest) = mime.split_once('/').ok_or(MimeError::Unparseable)?;
        let subtype = rest.split(';').next().unwrap_or_default().trim();
        if !is_restricted_name(subtype) {
            return Err(MimeError::Unparseable);
        }

        Ok(Self(CompactString::from(subtype)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_restricted_name(name: &str) -> bool {
    let mut chars = name.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphanumeric());
    first_ok
        && name.len() <= MAX_SUBTYPE_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c))
}

/// Guesses a MIME type from a file extension, the way a browser fills in
/// `File.type`. Unknown extensions give an empty string.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttc" => "font/collection",
        "eot" => "application/vnd.ms-fontobject",
        _ => "",
    }
}

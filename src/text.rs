//! Fixed-width text fields
//!
//! Every name travelling between the binding and a store is padded with
//! spaces to one of two widths, the short name width and the long name
//! width. Lists of names are stored back to back, `width` bytes each.
//!
//! Names longer than the width are cut at the last character boundary that
//! fits. This loses information and is not reversed by [`decode`].

use super::error;

/// The two name widths in use by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameWidths {
    /// Width of ids and short names
    pub name: usize,
    /// Width of long names, variable names and attribute values
    pub long_name: usize,
}

/// Longest prefix of `s` that fits into `width` bytes without
/// splitting a character
pub(crate) fn fit(s: &str, width: usize) -> &str {
    if s.len() <= width {
        return s;
    }
    let mut end = width;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// A buffer of `count` empty fields
pub fn blank(count: usize, width: usize) -> Vec<u8> {
    vec![b' '; count * width]
}

/// Pads (or truncates) every string to `width` bytes and concatenates them
pub fn encode<S: AsRef<str>>(strings: &[S], width: usize) -> Vec<u8> {
    let mut buffer = Vec::with_capacity(strings.len() * width);
    for s in strings {
        let s = fit(s.as_ref(), width);
        buffer.extend_from_slice(s.as_bytes());
        buffer.resize(buffer.len() + width - s.len(), b' ');
    }
    buffer
}

/// Encodes a single name
pub fn encode_one(s: &str, width: usize) -> Vec<u8> {
    encode(&[s], width)
}

fn trim(field: &[u8]) -> String {
    String::from_utf8_lossy(field)
        .trim_end_matches(|c| c == ' ' || c == '\0')
        .to_string()
}

/// Splits `buffer` into `count` fields of `width` bytes and strips the padding
pub fn decode(buffer: &[u8], count: usize, width: usize) -> error::Result<Vec<String>> {
    let wanted = count * width;
    if buffer.len() < wanted {
        return Err(error::Error::BufferLen {
            wanted,
            actual: buffer.len(),
        });
    }
    if width == 0 {
        return Ok(vec![String::new(); count]);
    }
    Ok(buffer[..wanted].chunks(width).map(trim).collect())
}

/// Decodes a single name
pub fn decode_one(buffer: &[u8], width: usize) -> error::Result<String> {
    let mut names = decode(buffer, 1, width)?;
    Ok(names.pop().unwrap_or_default())
}

/// A name together with the width it is stored at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedName {
    value: String,
    width: usize,
    truncated: bool,
}

impl BoundedName {
    /// Bounds `value` to `width` bytes, truncating it if needed
    pub fn new(value: &str, width: usize) -> Self {
        let fitted = fit(value, width);
        Self {
            value: fitted.to_string(),
            width,
            truncated: fitted.len() != value.len(),
        }
    }

    /// Reads a name back from a padded field
    pub fn from_bytes(buffer: &[u8], width: usize) -> error::Result<Self> {
        Ok(Self {
            value: decode_one(buffer, width)?,
            width,
            truncated: false,
        })
    }

    /// The (possibly truncated) name
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the name given to `new` did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The padded field
    pub fn to_bytes(&self) -> Vec<u8> {
        encode_one(&self.value, self.width)
    }
}

impl std::fmt::Display for BoundedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_spaces() {
        let buffer = encode(&["ab", "c"], 4);
        assert_eq!(buffer, b"ab  c   ".to_vec());
        assert_eq!(decode(&buffer, 2, 4).unwrap(), vec!["ab", "c"]);
    }

    #[test]
    fn truncates_long_names() {
        let buffer = encode(&["network1d"], 7);
        assert_eq!(buffer, b"network".to_vec());
        assert_eq!(decode_one(&buffer, 7).unwrap(), "network");

        let name = BoundedName::new("network1d", 7);
        assert!(name.is_truncated());
        assert_eq!(name.value(), "network");
        assert!(!BoundedName::new("mesh", 7).is_truncated());
    }

    #[test]
    fn truncation_keeps_characters_whole() {
        // 'é' is two bytes, it can not be split at width 2
        let buffer = encode(&["aé"], 2);
        assert_eq!(buffer, b"a ".to_vec());
    }

    #[test]
    fn trims_trailing_nul() {
        let buffer = b"id\0\0next".to_vec();
        assert_eq!(decode(&buffer, 2, 4).unwrap(), vec!["id", "next"]);
    }

    #[test]
    fn short_buffer() {
        assert_eq!(
            decode(b"abc", 2, 2),
            Err(error::Error::BufferLen {
                wanted: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn blank_fields_decode_empty() {
        assert_eq!(decode(&blank(3, 5), 3, 5).unwrap(), vec!["", "", ""]);
        assert_eq!(BoundedName::from_bytes(&blank(1, 5), 5).unwrap().value(), "");
    }
}

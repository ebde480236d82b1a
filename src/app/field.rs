//! Fixed-length hexadecimal input fields.

use crate::types::{parse_hex, KeyPress, ScanCode};

/// Upper bound on any field's length.
pub const MAX_FIELD_LEN: usize = 16;

/// Check whether `ch` is accepted as a field digit.
///
/// Only `0-9`, `a-f` and `A-F` are accepted.
#[inline]
pub fn is_hex_key(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

/// An editable hex text field.
///
/// The content is always upper-case hex and never longer than `max_len`.
/// A field shorter than `max_len` is partial and does not yield a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Column of the opening bracket.
    pub x: u16,
    pub y: u16,
    pub label: &'static str,
    data: String,
    max_len: usize,
}

impl InputField {
    /// Create a field. `max_len` is clamped to `1..=MAX_FIELD_LEN`; `initial`
    /// is filtered to hex digits and truncated to fit.
    pub fn new(label: &'static str, x: u16, y: u16, max_len: usize, initial: &str) -> Self {
        let max_len = max_len.clamp(1, MAX_FIELD_LEN);
        let data = initial
            .chars()
            .filter(|c| is_hex_key(*c))
            .map(|c| c.to_ascii_uppercase())
            .take(max_len)
            .collect();
        Self {
            x,
            y,
            label,
            data,
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// A field is complete once every position holds a digit.
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.max_len
    }

    /// Parsed value of a complete field.
    pub fn value(&self) -> Option<u16> {
        if self.is_complete() {
            parse_hex(&self.data)
        } else {
            None
        }
    }

    /// Apply one key press. Returns `true` if the content changed.
    ///
    /// Backspace drops the last digit. A hex digit is appended upper-cased;
    /// on a full field it replaces the whole content. Everything else is
    /// ignored.
    pub fn edit(&mut self, key: &KeyPress) -> bool {
        if key.scan == ScanCode::BACKSPACE {
            return self.data.pop().is_some();
        }

        match key.ch {
            Some(ch) if is_hex_key(ch) => {
                if self.data.len() >= self.max_len {
                    self.data.clear();
                }
                self.data.push(ch.to_ascii_uppercase());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(initial: &str) -> InputField {
        InputField::new("Start Port:", 15, 5, 4, initial)
    }

    fn type_str(field: &mut InputField, text: &str) {
        for ch in text.chars() {
            field.edit(&KeyPress::char(ch));
        }
    }

    #[test]
    fn test_overflow_wraps_to_new_digit() {
        let mut f = field("");
        type_str(&mut f, "12345");
        assert_eq!(f.text(), "5");

        assert!(f.edit(&KeyPress::backspace()));
        assert_eq!(f.text(), "");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut f = field("");
        assert!(!f.edit(&KeyPress::backspace()));
        assert_eq!(f.text(), "");
    }

    #[test]
    fn test_backspace_drops_last_digit() {
        let mut f = field("03FF");
        f.edit(&KeyPress::backspace());
        assert_eq!(f.text(), "03F");
        assert!(!f.is_complete());
        assert_eq!(f.value(), None);
    }

    #[test]
    fn test_digits_are_upper_cased() {
        let mut f = field("");
        type_str(&mut f, "3fA0");
        assert_eq!(f.text(), "3FA0");
        assert_eq!(f.value(), Some(0x3FA0));
    }

    #[test]
    fn test_non_hex_keys_ignored() {
        let mut f = field("03");
        for ch in ['g', 'G', 'z', '[', '`', '_', ' ', '\r', '\t'] {
            assert!(!f.edit(&KeyPress::char(ch)));
        }
        assert!(!f.edit(&KeyPress::scan(ScanCode::F2)));
        assert!(!f.edit(&KeyPress::enter()));
        assert_eq!(f.text(), "03");
    }

    #[test]
    fn test_length_never_exceeds_max() {
        let mut f = field("");
        for (i, ch) in "0123456789abcdefABCDEF".chars().cycle().take(100).enumerate() {
            f.edit(&KeyPress::char(ch));
            assert!(f.len() <= f.max_len(), "overflow after {} keys", i + 1);
        }
    }

    #[test]
    fn test_initial_content_sanitized() {
        let f = InputField::new("End Port:", 15, 6, 4, "03ffzz99");
        assert_eq!(f.text(), "03FF");

        let f = InputField::new("Wide:", 15, 7, 40, "");
        assert_eq!(f.max_len(), MAX_FIELD_LEN);
    }
}

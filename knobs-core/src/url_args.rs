//! URL argument codec for shareable knob state
//!
//! Knob state travels in one query value: `label:value;` per knob, with a
//! trailing `;` after every entry. Values cannot contain `:`.

use tracing::debug;

pub const ENTRY_SEPARATOR: char = ';';
pub const PAIR_SEPARATOR: char = ':';

/// Decode a URL argument string into label/value pairs.
///
/// Entries without a `:` are skipped. Anything after a second `:` in an
/// entry is dropped.
pub fn parse_args(encoded: &str) -> Vec<(String, String)> {
    encoded
        .split(ENTRY_SEPARATOR)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| {
            let mut parts = entry.split(PAIR_SEPARATOR);
            match (parts.next(), parts.next()) {
                (Some(label), Some(value)) => Some((label.to_string(), value.to_string())),
                _ => {
                    debug!("Skipping malformed URL arg entry '{entry}'");
                    None
                }
            }
        })
        .collect()
}

/// Encode label/value pairs into a URL argument string.
pub fn build_args<L: AsRef<str>, V: AsRef<str>>(pairs: &[(L, V)]) -> String {
    let mut builder = ArgsBuilder::new();
    for (label, value) in pairs {
        builder.set_string(label.as_ref(), value.as_ref());
    }
    builder.build()
}

/// Collects knob values and produces the encoded argument string
pub struct ArgsBuilder {
    encoded: String,
}

impl ArgsBuilder {
    pub fn new() -> Self {
        Self {
            encoded: String::new(),
        }
    }

    pub fn set_string(&mut self, label: &str, value: &str) {
        self.encoded.push_str(label);
        self.encoded.push(PAIR_SEPARATOR);
        self.encoded.push_str(value);
        self.encoded.push(ENTRY_SEPARATOR);
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }

    pub fn build(self) -> String {
        self.encoded
    }

    pub fn build_option(self) -> Option<String> {
        if self.encoded.is_empty() {
            None
        } else {
            Some(self.encoded)
        }
    }
}

impl Default for ArgsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(l, v)| (l.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn encodes_with_trailing_separator() {
        assert_eq!(build_args(&[("a", "1"), ("b", "2")]), "a:1;b:2;");
    }

    #[test]
    fn decodes_in_order() {
        assert_eq!(parse_args("a:1;b:2;"), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn trailing_separator_is_optional() {
        assert_eq!(parse_args("a:1;b:2"), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn skips_malformed_entries() {
        assert_eq!(
            parse_args(";;junk;a:1;;other;b:2"),
            pairs(&[("a", "1"), ("b", "2")])
        );
    }

    #[test]
    fn empty_value_is_kept() {
        assert_eq!(parse_args("a:;"), pairs(&[("a", "")]));
    }

    #[test]
    fn extra_colons_are_dropped() {
        assert_eq!(parse_args("url:http://x;"), pairs(&[("url", "http")]));
    }

    #[test]
    fn empty_input() {
        assert!(parse_args("").is_empty());
        assert_eq!(ArgsBuilder::new().build_option(), None);
    }

    proptest! {
        #[test]
        fn separator_free_pairs_survive(
            entries in prop::collection::vec(("[a-z]{1,8}", "[a-zA-Z0-9 _-]{0,8}"), 0..6)
        ) {
            let encoded = build_args(&entries);
            prop_assert_eq!(encoded.matches(ENTRY_SEPARATOR).count(), entries.len());
            prop_assert_eq!(parse_args(&encoded), entries);
        }
    }
}

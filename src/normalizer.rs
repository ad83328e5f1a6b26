//! Normalization of raw words into their comparison form.
//!
//! Normalizing a word resolves substitute characters (`@` for `a`, `0` for `o`, and so on),
//! lowercases letters, and strips anything that carries no letter meaning, such as punctuation
//! inserted to break a word up. The result remembers where each of its characters came from in
//! the raw word.

use crate::substitution::{SubstitutionTable, SUBSTITUTIONS};
use core::ops::Range;

/// A character of a [`NormalizedForm`] and its origin.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Origin {
    /// Byte offset of the character within the normalized text.
    offset: usize,
    /// Byte range of the source character within the raw word.
    source: Range<usize>,
}

/// The comparison form of a word.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedForm {
    text: String,
    origins: Vec<Origin>,
}

impl NormalizedForm {
    /// The normalized text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maps a byte range of the normalized text back to the raw word it was produced from.
    ///
    /// The range must start and end on character boundaries of the normalized text. Returns
    /// `None` for empty or out-of-bounds ranges.
    pub fn source_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        if range.start >= range.end {
            return None;
        }
        let first = self
            .origins
            .binary_search_by_key(&range.start, |origin| origin.offset)
            .ok()?;
        let last = match self
            .origins
            .binary_search_by_key(&range.end, |origin| origin.offset)
        {
            Ok(index) => index.checked_sub(1)?,
            Err(index) if range.end == self.text.len() => index.checked_sub(1)?,
            Err(_) => return None,
        };
        // Characters produced from the same source share its range.
        Some(self.origins[first].source.start..self.origins[last].source.end)
    }
}

/// Produces [`NormalizedForm`]s using a [`SubstitutionTable`].
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    table: &'static SubstitutionTable,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            table: &SUBSTITUTIONS,
        }
    }
}

impl Normalizer {
    #[inline]
    pub fn new(table: &'static SubstitutionTable) -> Self {
        Self { table }
    }

    /// Returns whether `c` can be part of a normalized word.
    #[inline]
    pub fn is_letter_like(&self, c: char) -> bool {
        c.is_alphanumeric() || self.table.contains(c)
    }

    /// Normalizes `word`.
    ///
    /// Substitutes are replaced by their canonical letter, letters and digits are lowercased,
    /// and every other character is dropped.
    ///
    /// Lowercasing is per character with [`char::to_lowercase`], not full Unicode case folding:
    /// `ß` is kept rather than folded to `ss`, and `Σ` always becomes `σ`, never final `ς`.
    pub fn normalize(&self, word: &str) -> NormalizedForm {
        let mut form = NormalizedForm {
            text: String::with_capacity(word.len()),
            origins: Vec::with_capacity(word.len()),
        };

        for (start, c) in word.char_indices() {
            let source = start..start + c.len_utf8();
            if let Some(letter) = self.table.canonical(c) {
                form.origins.push(Origin {
                    offset: form.text.len(),
                    source,
                });
                form.text.push(letter);
            } else if c.is_alphanumeric() {
                for lowercase in c.to_lowercase() {
                    form.origins.push(Origin {
                        offset: form.text.len(),
                        source: source.clone(),
                    });
                    form.text.push(lowercase);
                }
            }
        }

        form
    }
}

#[cfg(test)]
mod tests {
    use crate::normalizer::Normalizer;

    fn normalize(word: &str) -> String {
        Normalizer::default().normalize(word).as_str().to_owned()
    }

    #[test]
    fn lowercase() {
        assert_eq!(normalize("FoO"), "foo");
    }

    #[test]
    fn cyrillic_lowercase() {
        assert_eq!(normalize("ХУЄСОС"), "хуєсос");
    }

    #[test]
    fn substitutions() {
        assert_eq!(normalize("h3ll0"), "hello");
        assert_eq!(normalize("@ssh0l3"), "asshole");
        assert_eq!(normalize("$h1t"), "shit");
    }

    #[test]
    fn strips_inserted_punctuation() {
        assert_eq!(normalize("a.s.s.h.o.l.e"), "asshole");
        assert_eq!(normalize("f-u_c*k"), "fuck");
    }

    #[test]
    fn strips_combining_marks() {
        assert_eq!(normalize("ba\u{303}r"), "bar");
    }

    #[test]
    fn lowercase_is_not_case_folding() {
        assert_eq!(normalize("STRAßE"), "straße");
        assert_eq!(normalize("ΟΔΟΣ"), "οδοσ");
    }

    #[test]
    fn unmapped_digits_pass_through() {
        assert_eq!(normalize("269"), "269");
    }

    #[test]
    fn empty() {
        assert!(Normalizer::default().normalize("").is_empty());
        assert!(Normalizer::default().normalize("!?.").is_empty());
    }

    #[test]
    fn source_range() {
        let form = Normalizer::default().normalize("a.s.s");

        assert_eq!(form.as_str(), "ass");
        assert_eq!(form.source_range(0..3), Some(0..5));
        assert_eq!(form.source_range(1..2), Some(2..3));
        assert_eq!(form.source_range(2..3), Some(4..5));
    }

    #[test]
    fn source_range_multibyte() {
        let form = Normalizer::default().normalize("П-хуй");

        assert_eq!(form.as_str(), "пхуй");
        // "п" is two bytes in both forms, "-" is dropped.
        assert_eq!(form.source_range(2..8), Some(3..9));
    }

    #[test]
    fn source_range_expanded_lowercase() {
        // 'İ' lowercases to two characters.
        let form = Normalizer::default().normalize("İx");

        assert_eq!(form.as_str(), "i\u{307}x");
        assert_eq!(form.source_range(0..1), Some(0..2));
        assert_eq!(form.source_range(3..4), Some(2..3));
    }

    #[test]
    fn source_range_out_of_bounds() {
        let form = Normalizer::default().normalize("abc");

        assert_eq!(form.source_range(1..1), None);
        assert_eq!(form.source_range(2..7), None);
    }

    #[test]
    fn letter_like() {
        let normalizer = Normalizer::default();

        assert!(normalizer.is_letter_like('a'));
        assert!(normalizer.is_letter_like('ї'));
        assert!(normalizer.is_letter_like('@'));
        assert!(normalizer.is_letter_like('9'));
        assert!(!normalizer.is_letter_like('!'));
        assert!(!normalizer.is_letter_like('#'));
    }
}

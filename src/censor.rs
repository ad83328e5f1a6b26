//! Replacement of profane words.
//!
//! A [`CensorStyle`] turns a word into a replacement of the same length, counted either in
//! `char`s or in grapheme clusters. In full mode every unit is replaced by the censor symbol. In
//! partial mode the first and last units are kept:
//!
//! ```
//! use censore::censor::CensorStyle;
//!
//! let style = CensorStyle::new('*').partial(true);
//!
//! assert_eq!(style.apply("anyword"), "a*****d");
//! ```
//!
//! Words of one unit are always replaced, while words of two units have no interior and come back
//! unchanged in partial mode.

use crate::error::{Error, Result};
use unicode_segmentation::UnicodeSegmentation;

/// The unit in which a word's length is counted when censoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CensorUnit {
    /// Unicode scalar values. `"a\u{303}"` becomes two symbols.
    Chars,
    /// Extended grapheme clusters. `"a\u{303}"` becomes one symbol.
    Graphemes,
}

impl Default for CensorUnit {
    fn default() -> Self {
        CensorUnit::Chars
    }
}

/// How profane words are replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CensorStyle {
    symbol: char,
    partial: bool,
    unit: CensorUnit,
}

impl Default for CensorStyle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SYMBOL)
    }
}

impl CensorStyle {
    pub const DEFAULT_SYMBOL: char = '#';

    /// Creates a full-mode style replacing each `char` with `symbol`.
    #[inline]
    pub const fn new(symbol: char) -> Self {
        Self {
            symbol,
            partial: false,
            unit: CensorUnit::Chars,
        }
    }

    /// Parses a censor symbol given as a string.
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless `symbol` is exactly one `char`.
    pub fn parse_symbol(symbol: &str) -> Result<char> {
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::InvalidConfiguration(format!(
                "censor symbol must be a single character, got {:?}",
                symbol
            ))),
        }
    }

    #[inline]
    pub fn symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    #[inline]
    pub fn partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    #[inline]
    pub fn unit(mut self, unit: CensorUnit) -> Self {
        self.unit = unit;
        self
    }

    #[inline]
    pub fn censor_symbol(&self) -> char {
        self.symbol
    }

    #[inline]
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    #[inline]
    pub fn censor_unit(&self) -> CensorUnit {
        self.unit
    }

    /// Returns the replacement for `word`.
    ///
    /// The replacement always has as many units as `word`.
    pub fn apply(&self, word: &str) -> String {
        let units = match self.unit {
            CensorUnit::Chars => word
                .char_indices()
                .map(|(index, c)| &word[index..index + c.len_utf8()])
                .collect::<Vec<_>>(),
            CensorUnit::Graphemes => word.graphemes(true).collect::<Vec<_>>(),
        };
        let last = units.len().saturating_sub(1);
        let keep_ends = self.partial && units.len() > 1;

        units.iter().enumerate().fold(
            String::with_capacity(word.len()),
            |mut accumulator, (index, unit)| {
                if keep_ends && (index == 0 || index == last) {
                    accumulator.push_str(unit);
                } else {
                    accumulator.push(self.symbol);
                }
                accumulator
            },
        )
    }
}

/// Censors `word` unconditionally, counting by `char`.
///
/// ```
/// assert_eq!(censore::censor::censor_word("@ssh0l3", false, '#'), "#######");
/// ```
pub fn censor_word(word: &str, partial: bool, symbol: char) -> String {
    CensorStyle::new(symbol).partial(partial).apply(word)
}

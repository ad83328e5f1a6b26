//! Tokenization of text and the per-word filtering loop.
//!
//! Text is split into alternating word and separator tokens, always on grapheme cluster
//! boundaries. A word starts at a grapheme cluster beginning with a letter-like character (a
//! letter, a digit, or a substitute such as `@`) and runs over the following non-whitespace
//! clusters, ending with the last cluster that begins with a letter-like character. Punctuation
//! inside a word stays part of it, so `a.s.s` is one word, while leading and trailing punctuation
//! and all whitespace are separators. A word is split at clause punctuation (`,`, `;`, `:`, `!`,
//! `?`) when the letter runs on both sides are longer than one cluster, so `hello,fuck` is two
//! words while `f!u!c!k` stays one. Joining every token reproduces the text exactly.
//!
//! Every cluster is examined a bounded number of times, so tokenizing is linear in the length of
//! the text.

use crate::{
    censor::CensorStyle,
    matcher::Matcher,
    normalizer::Normalizer,
    store::ActivePatternSet,
};
use core::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Word,
    Separator,
}

/// A span of the source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) raw: &'a str,
    /// Byte range of `raw` within the source text.
    pub(crate) range: Range<usize>,
    pub(crate) kind: TokenKind,
}

/// Lazily splits text into [`Token`]s.
#[derive(Clone, Debug)]
pub(crate) struct Tokens<'a> {
    text: &'a str,
    position: usize,
    normalizer: Normalizer,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str, normalizer: Normalizer) -> Self {
        Self {
            text,
            position: 0,
            normalizer,
        }
    }

    fn starts_letter_like(&self, grapheme: &str) -> bool {
        grapheme
            .chars()
            .next()
            .map_or(false, |c| self.normalizer.is_letter_like(c))
    }

    /// Length of the word at the start of `rest`, which begins with a letter-like cluster.
    fn word_len(&self, rest: &str) -> usize {
        let mut end = 0;
        // Letter-like clusters in the current run.
        let mut run = 0;
        // End of a run of two or more clusters followed by clause punctuation.
        let mut split = None;

        for (index, grapheme) in rest.grapheme_indices(true) {
            if grapheme.starts_with(char::is_whitespace) {
                break;
            }
            if self.starts_letter_like(grapheme) {
                run += 1;
                if let (2, Some(split)) = (run, split) {
                    return split;
                }
                end = index + grapheme.len();
            } else {
                if run >= 2 && grapheme.starts_with(is_clause_punctuation) {
                    split = Some(end);
                } else if run > 0 {
                    split = None;
                }
                run = 0;
            }
        }
        end
    }

    /// Length of the separator at the start of `rest`.
    fn separator_len(&self, rest: &str) -> usize {
        rest.grapheme_indices(true)
            .find(|(_, grapheme)| self.starts_letter_like(grapheme))
            .map_or(rest.len(), |(index, _)| index)
    }
}

fn is_clause_punctuation(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '!' | '?')
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let start = self.position;
        let rest = self.text.get(start..).filter(|rest| !rest.is_empty())?;
        let (len, kind) = if rest
            .graphemes(true)
            .next()
            .map_or(false, |grapheme| self.starts_letter_like(grapheme))
        {
            (self.word_len(rest), TokenKind::Word)
        } else {
            (self.separator_len(rest), TokenKind::Separator)
        };

        self.position += len;
        Some(Token {
            raw: &rest[..len],
            range: start..start + len,
            kind,
        })
    }
}

/// A profane word found in text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<'a> {
    /// The word as it appears in the text.
    pub word: &'a str,
    /// Byte range of the word within the text.
    pub range: Range<usize>,
    /// Byte range within the text of the first pattern occurrence that made the word profane.
    ///
    /// For masked words this covers the masking characters as well, such as `"a.s.s"` in
    /// `"a.s.s.h.o.l.e"` for the pattern `"ass"`.
    pub hit: Range<usize>,
}

/// The filtering loop for one call.
pub(crate) struct Pipeline<'a> {
    active: &'a ActivePatternSet,
    matcher: Matcher,
    normalizer: Normalizer,
}

impl<'a> Pipeline<'a> {
    pub(crate) fn new(
        active: &'a ActivePatternSet,
        matcher: Matcher,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            active,
            matcher,
            normalizer,
        }
    }

    fn words<'t>(&self, text: &'t str) -> impl Iterator<Item = Token<'t>> {
        Tokens::new(text, self.normalizer).filter(|token| token.kind == TokenKind::Word)
    }

    /// Returns whether the single `word` is profane, without tokenizing it.
    pub(crate) fn is_profane(&self, word: &str) -> bool {
        self.matcher
            .is_profane(&self.normalizer.normalize(word), self.active)
    }

    /// Returns whether any word of `text` is profane, stopping at the first one.
    pub(crate) fn contains(&self, text: &str) -> bool {
        !self.active.is_empty() && self.words(text).any(|token| self.is_profane(token.raw))
    }

    /// Replaces every profane word of `text` using `style`.
    pub(crate) fn censor(&self, text: &str, style: &CensorStyle) -> String {
        if self.active.is_empty() {
            return text.to_owned();
        }
        let mut output = String::with_capacity(text.len());
        for token in Tokens::new(text, self.normalizer) {
            if token.kind == TokenKind::Word && self.is_profane(token.raw) {
                tracing::trace!(range = ?token.range, "censoring word");
                output.push_str(&style.apply(token.raw));
            } else {
                output.push_str(token.raw);
            }
        }
        output
    }

    /// Every profane word of `text`, in order.
    pub(crate) fn find<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        if self.active.is_empty() {
            return Vec::new();
        }
        self.words(text)
            .filter_map(|token| {
                let form = self.normalizer.normalize(token.raw);
                let hit = self.matcher.first_hit(&form, self.active)?;
                let source = form
                    .source_range(hit)
                    .unwrap_or_else(|| 0..token.raw.len());
                tracing::trace!(range = ?token.range, "found profane word");
                Some(Match {
                    word: token.raw,
                    hit: token.range.start + source.start..token.range.start + source.end,
                    range: token.range,
                })
            })
            .collect()
    }
}

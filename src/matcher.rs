//! Deciding whether a normalized word is profane.
//!
//! A word is profane when some pattern occurs in it as a substring and that occurrence is not
//! overridden by an exclusion. How far an exclusion reaches is controlled by [`ExclusionScope`].

use crate::{normalizer::NormalizedForm, store::ActivePatternSet};
use core::{cmp::Reverse, iter, ops::Range};

/// How exclusions override pattern matches.
///
/// Under every scope a word equal to an exclusion entry is never profane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExclusionScope {
    /// A word contained in an exclusion entry is never profane, however much longer the entry
    /// is. This is the strictest token-scoped reading of exclusions, and the one to choose when
    /// every prefix or fragment of a safe word must stay uncensored. Exclusions occurring inside
    /// a longer word have no effect.
    ///
    /// With the pattern `"bad"` and the exclusion `"baddest"`, `"badde"` is excluded but
    /// `"baddests"` is not.
    Token,
    /// A pattern occurrence lying inside an occurrence of an exclusion within the word is
    /// ignored. The word is profane if any other occurrence remains.
    ///
    /// With the pattern `"bad"` and the exclusion `"baddest"`, `"baddests"` is excluded but
    /// `"badde"` and `"badbaddest"` are not. A word that is only a fragment of an exclusion entry
    /// is matched normally, so with the exclusion `"dickens"` the word `"dick"` stays profane;
    /// use [`Token`] to suppress fragments as well.
    ///
    /// [`Token`]: ExclusionScope::Token
    Span,
    /// Any exclusion occurring anywhere in the word excludes the whole word.
    ///
    /// With the pattern `"bad"` and the exclusion `"baddest"`, `"badbaddest"` is excluded.
    Substring,
}

impl Default for ExclusionScope {
    fn default() -> Self {
        ExclusionScope::Span
    }
}

/// Every occurrence of `needle` in `haystack`, including overlapping ones.
fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut from = 0;
    iter::from_fn(move || {
        let start = from + haystack.get(from..)?.find(needle)?;
        // Advance by one character so overlapping occurrences are found.
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
        Some(start..start + needle.len())
    })
}

/// Matches normalized words against an [`ActivePatternSet`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Matcher {
    scope: ExclusionScope,
}

impl Matcher {
    #[inline]
    pub fn new(scope: ExclusionScope) -> Self {
        Self { scope }
    }

    #[inline]
    pub fn scope(&self) -> ExclusionScope {
        self.scope
    }

    fn word_excluded(&self, text: &str, active: &ActivePatternSet) -> bool {
        let mut exclude_patterns = active
            .exclude_patterns()
            .filter(|exclusion| !exclusion.is_empty());
        match self.scope {
            ExclusionScope::Token => exclude_patterns.any(|exclusion| exclusion.contains(text)),
            ExclusionScope::Span => false,
            ExclusionScope::Substring => {
                exclude_patterns.any(|exclusion| text.contains(exclusion))
            }
        }
    }

    /// Every unexcluded pattern occurrence in `form`, as byte ranges of the normalized text.
    fn hits<'a>(
        &self,
        form: &'a NormalizedForm,
        active: &'a ActivePatternSet,
    ) -> impl Iterator<Item = Range<usize>> + 'a {
        let text = form.as_str();
        let excluded = text.is_empty() || self.word_excluded(text, active);
        let excluded_spans: Vec<Range<usize>> =
            if !excluded && self.scope == ExclusionScope::Span {
                active
                    .exclude_patterns()
                    .filter(|exclusion| !exclusion.is_empty())
                    .flat_map(|exclusion| occurrences(text, exclusion))
                    .collect()
            } else {
                Vec::new()
            };

        active
            .patterns()
            .filter(move |pattern| !excluded && !pattern.is_empty())
            .flat_map(move |pattern| occurrences(text, pattern))
            .filter(move |hit| {
                !excluded_spans
                    .iter()
                    .any(|span| span.start <= hit.start && hit.end <= span.end)
            })
    }

    /// Returns whether `form` is profane.
    pub fn is_profane(&self, form: &NormalizedForm, active: &ActivePatternSet) -> bool {
        self.hits(form, active).next().is_some()
    }

    /// The earliest unexcluded pattern occurrence in `form`, preferring the longest among those
    /// starting at the same position.
    ///
    /// The range is in bytes of the normalized text; see [`NormalizedForm::source_range()`].
    pub fn first_hit(
        &self,
        form: &NormalizedForm,
        active: &ActivePatternSet,
    ) -> Option<Range<usize>> {
        self.hits(form, active)
            .min_by_key(|hit| (hit.start, Reverse(hit.end)))
    }
}

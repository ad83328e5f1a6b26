//! Filter configuration and per-call overrides.

use crate::{
    censor::CensorStyle,
    error::Result,
    language::{self, LanguageCode},
    store::PatternSet,
};
use hashbrown::HashSet;
use std::sync::Arc;

/// Options overriding a filter's configuration for a single call.
///
/// Nothing set here is stored on the filter. Unset options fall back to the filter's
/// configuration.
///
/// ```
/// use censore::{Overrides, ProfanityFilter};
///
/// let filter = ProfanityFilter::new()?;
/// let overrides = Overrides::new()
///     .languages(&["en"])
///     .custom_patterns(&["lololo"])
///     .censor_symbol("*");
///
/// assert_eq!(filter.censor_with("lololo fuck", &overrides)?, "****** ****");
/// # Ok::<(), censore::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    languages: Option<Vec<String>>,
    additional_languages: Vec<String>,
    custom_patterns: Vec<String>,
    custom_exclude_patterns: Vec<String>,
    censor_symbol: Option<String>,
    partial_censor: Option<bool>,
}

fn to_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().to_owned())
        .collect()
}

impl Overrides {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the filter's languages for this call.
    ///
    /// An empty list selects no language, leaving only custom patterns in effect.
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages = Some(to_strings(languages));
        self
    }

    /// Adds languages on top of the filter's languages (or those given to [`languages()`]).
    ///
    /// [`languages()`]: Overrides::languages
    pub fn additional_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.additional_languages.extend(to_strings(languages));
        self
    }

    pub fn custom_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_patterns.extend(to_strings(patterns));
        self
    }

    pub fn custom_exclude_patterns<I, S>(mut self, exclude_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_exclude_patterns.extend(to_strings(exclude_patterns));
        self
    }

    /// Sets the censor symbol. It must be a single character, which is checked when the call is
    /// made.
    pub fn censor_symbol(mut self, symbol: &str) -> Self {
        self.censor_symbol = Some(symbol.to_owned());
        self
    }

    pub fn partial_censor(mut self, partial: bool) -> Self {
        self.partial_censor = Some(partial);
        self
    }

    /// Returns whether these overrides change which patterns are in effect.
    pub(crate) fn changes_patterns(&self) -> bool {
        self.languages.is_some()
            || !self.additional_languages.is_empty()
            || !self.custom_patterns.is_empty()
            || !self.custom_exclude_patterns.is_empty()
    }
}

/// The validated configuration of a filter or of a single call.
#[derive(Clone, Debug)]
pub struct FilterConfig {
    languages: HashSet<LanguageCode>,
    custom: Arc<PatternSet>,
    censor: CensorStyle,
}

impl FilterConfig {
    pub(crate) fn new(languages: HashSet<LanguageCode>, censor: CensorStyle) -> Self {
        Self {
            languages,
            custom: Arc::new(PatternSet::default()),
            censor,
        }
    }

    /// The selected languages. May contain [`LanguageCode::ALL`].
    #[inline]
    pub fn languages(&self) -> &HashSet<LanguageCode> {
        &self.languages
    }

    /// Patterns in effect in addition to the languages' patterns.
    #[inline]
    pub fn custom(&self) -> &PatternSet {
        &self.custom
    }

    #[inline]
    pub(crate) fn custom_shared(&self) -> &Arc<PatternSet> {
        &self.custom
    }

    #[inline]
    pub fn censor_style(&self) -> CensorStyle {
        self.censor
    }

    pub(crate) fn add_language(&mut self, language: LanguageCode) {
        self.languages.insert(language);
    }

    /// Applies `overrides`, returning the configuration for one call.
    ///
    /// Fails if a language code, custom pattern, or censor symbol is invalid. Languages are not
    /// resolved here.
    pub fn with_overrides(&self, overrides: &Overrides) -> Result<FilterConfig> {
        let mut config = self.with_pattern_overrides(overrides)?;
        config.censor = self.censor_style_with(overrides)?;
        Ok(config)
    }

    /// Applies only the language and custom pattern options of `overrides`.
    pub(crate) fn with_pattern_overrides(&self, overrides: &Overrides) -> Result<FilterConfig> {
        let mut languages = match &overrides.languages {
            Some(languages) => language::parse_all(languages)?.into_iter().collect(),
            None => self.languages.clone(),
        };
        languages.extend(language::parse_all(&overrides.additional_languages)?);

        let custom = if overrides.custom_patterns.is_empty()
            && overrides.custom_exclude_patterns.is_empty()
        {
            Arc::clone(&self.custom)
        } else {
            Arc::new(self.custom.union(&PatternSet::new(
                &overrides.custom_patterns,
                &overrides.custom_exclude_patterns,
            )?))
        };

        Ok(FilterConfig {
            languages,
            custom,
            censor: self.censor,
        })
    }

    /// Applies only the censor options of `overrides`.
    pub(crate) fn censor_style_with(&self, overrides: &Overrides) -> Result<CensorStyle> {
        let mut censor = self.censor;
        if let Some(symbol) = &overrides.censor_symbol {
            censor = censor.symbol(CensorStyle::parse_symbol(symbol)?);
        }
        if let Some(partial) = overrides.partial_censor {
            censor = censor.partial(partial);
        }
        Ok(censor)
    }
}

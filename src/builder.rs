use crate::{
    censor::{CensorStyle, CensorUnit},
    config::FilterConfig,
    error::Result,
    language::{self, LanguageCode},
    loader::{BuiltinLoader, DirectoryLoader, PatternLoader},
    matcher::{ExclusionScope, Matcher},
    store::PatternStore,
    ProfanityFilter,
};
use core::fmt;
use hashbrown::HashSet;
use std::path::PathBuf;

/// A builder for [`ProfanityFilter`].
///
/// Every option has a default, so `ProfanityFilterBuilder::new().build()` gives the same filter
/// as [`ProfanityFilter::new()`]: all built-in languages, full censoring with `'#'`.
///
/// Example usage:
///
/// ```
/// use censore::{ExclusionScope, ProfanityFilterBuilder};
///
/// let filter = ProfanityFilterBuilder::new()
///     .languages(&["en", "uk"])
///     .custom_patterns(&["lololo"])
///     .censor_symbol("*")
///     .partial_censor(true)
///     .exclusion_scope(ExclusionScope::Substring)
///     .build()?;
///
/// assert_eq!(filter.censor("lololo fucking"), "l****o f*****g");
/// # Ok::<(), censore::Error>(())
/// ```
pub struct ProfanityFilterBuilder {
    languages: Vec<String>,
    custom_patterns: Vec<String>,
    custom_exclude_patterns: Vec<String>,
    censor_symbol: Option<String>,
    partial_censor: bool,
    censor_unit: CensorUnit,
    exclusion_scope: ExclusionScope,
    loader: Option<Box<dyn PatternLoader>>,
}

impl ProfanityFilterBuilder {
    pub const fn new() -> Self {
        Self {
            languages: Vec::new(),
            custom_patterns: Vec::new(),
            custom_exclude_patterns: Vec::new(),
            censor_symbol: None,
            partial_censor: false,
            censor_unit: CensorUnit::Chars,
            exclusion_scope: ExclusionScope::Span,
            loader: None,
        }
    }

    /// Adds a default language. If no language is added, the filter uses
    /// [`LanguageCode::ALL`].
    pub fn language(mut self, language: &str) -> Self {
        self.languages.push(language.to_owned());
        self
    }

    /// Adds default languages.
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages
            .extend(languages.into_iter().map(|language| language.as_ref().to_owned()));
        self
    }

    /// Adds patterns under the [`LanguageCode::CUSTOM`] language, which is then always in effect.
    pub fn custom_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_patterns
            .extend(patterns.into_iter().map(|pattern| pattern.as_ref().to_owned()));
        self
    }

    /// Adds exclusions under the [`LanguageCode::CUSTOM`] language.
    pub fn custom_exclude_patterns<I, S>(mut self, exclude_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_exclude_patterns.extend(
            exclude_patterns
                .into_iter()
                .map(|exclude_pattern| exclude_pattern.as_ref().to_owned()),
        );
        self
    }

    /// Sets the censor symbol, `"#"` by default. Must be a single character.
    pub fn censor_symbol(mut self, symbol: &str) -> Self {
        self.censor_symbol = Some(symbol.to_owned());
        self
    }

    pub fn partial_censor(mut self, partial: bool) -> Self {
        self.partial_censor = partial;
        self
    }

    pub fn censor_unit(mut self, unit: CensorUnit) -> Self {
        self.censor_unit = unit;
        self
    }

    pub fn exclusion_scope(mut self, scope: ExclusionScope) -> Self {
        self.exclusion_scope = scope;
        self
    }

    /// Reads language lists from `loader` instead of the built-in lists.
    pub fn loader<L>(mut self, loader: L) -> Self
    where
        L: PatternLoader + 'static,
    {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Reads language lists from `dir`, laid out as described by [`DirectoryLoader`].
    pub fn data_dir<P>(self, dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.loader(DirectoryLoader::new(dir))
    }

    /// Creates the filter, loading its default languages.
    ///
    /// Fails with [`Error::InvalidConfiguration`] for an invalid option, and with
    /// [`Error::UnknownLanguage`] or [`Error::MissingLanguageData`] if a default language cannot
    /// be loaded.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    /// [`Error::UnknownLanguage`]: crate::Error::UnknownLanguage
    /// [`Error::MissingLanguageData`]: crate::Error::MissingLanguageData
    pub fn build(self) -> Result<ProfanityFilter> {
        let symbol = match &self.censor_symbol {
            Some(symbol) => CensorStyle::parse_symbol(symbol)?,
            None => CensorStyle::DEFAULT_SYMBOL,
        };
        let censor = CensorStyle::new(symbol)
            .partial(self.partial_censor)
            .unit(self.censor_unit);

        let mut languages: HashSet<LanguageCode> = if self.languages.is_empty() {
            Some(LanguageCode::new(LanguageCode::ALL)?).into_iter().collect()
        } else {
            language::parse_all(&self.languages)?.into_iter().collect()
        };

        let store = PatternStore::from_boxed(
            self.loader
                .unwrap_or_else(|| Box::new(BuiltinLoader)),
        );
        if !self.custom_patterns.is_empty() || !self.custom_exclude_patterns.is_empty() {
            let custom = LanguageCode::new(LanguageCode::CUSTOM)?;
            store.extend_custom(&custom, &self.custom_patterns, &self.custom_exclude_patterns)?;
            languages.insert(custom);
        }

        ProfanityFilter::from_parts(
            store,
            FilterConfig::new(languages, censor),
            Matcher::new(self.exclusion_scope),
        )
    }
}

impl Default for ProfanityFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProfanityFilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfanityFilterBuilder")
            .field("languages", &self.languages)
            .field("custom_patterns", &self.custom_patterns)
            .field("custom_exclude_patterns", &self.custom_exclude_patterns)
            .field("censor_symbol", &self.censor_symbol)
            .field("partial_censor", &self.partial_censor)
            .field("censor_unit", &self.censor_unit)
            .field("exclusion_scope", &self.exclusion_scope)
            .finish()
    }
}

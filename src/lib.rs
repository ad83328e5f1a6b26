//! A multi-language profanity filter.
//!
//! A [`ProfanityFilter`] checks text against per-language lists of profanity patterns and
//! exclusion patterns, and censors the words it flags. Matching is by substring containment on a
//! normalized form of each word, so `"baddest"` is caught by the pattern `"bad"`, and masked
//! spellings such as `"@ssh0l3"` or `"f.u.c.k"` are caught like their plain forms. Exclusions
//! override matches, so a safe word like `"cockpit"` is not caught by `"cock"`.
//!
//! Censoring is length-preserving: every profane word is replaced by as many symbols as it has
//! characters, and everything else in the text is kept as is.
//!
//! Example usage:
//!
//! ```
//! use censore::{Overrides, ProfanityFilter};
//!
//! let filter = ProfanityFilter::new()?;
//!
//! assert_eq!(filter.censor("fuck you"), "#### you");
//! assert!(filter.contains_profanity("lorem ipsum @ssh0l3 dolor"));
//! assert_eq!(
//!     filter.censor_with("fucking hell", &Overrides::new().partial_censor(true))?,
//!     "f#####g hell"
//! );
//! # Ok::<(), censore::Error>(())
//! ```
//!
//! Built-in lists are provided for English (`en`), Russian (`ru`) and Ukrainian (`uk`). Other
//! lists can be read from a directory with [`ProfanityFilterBuilder::data_dir()`] or registered at
//! runtime with [`ProfanityFilter::add_custom_language()`].

mod builder;
pub mod censor;
mod config;
mod error;
mod language;
pub mod loader;
pub mod matcher;
pub mod normalizer;
mod pipeline;
pub mod store;
pub mod substitution;

pub use builder::ProfanityFilterBuilder;
pub use censor::{CensorStyle, CensorUnit};
pub use config::{FilterConfig, Overrides};
pub use error::{Error, Result};
pub use language::LanguageCode;
pub use matcher::ExclusionScope;
pub use pipeline::Match;

use matcher::Matcher;
use normalizer::Normalizer;
use pipeline::Pipeline;
use store::{ActivePatternSet, PatternStore};

/// A profanity filter over a set of languages.
///
/// Filtering methods take `&self` and can be called from several threads at once. Each has a
/// `_with` variant taking [`Overrides`] for a single call.
#[derive(Debug)]
pub struct ProfanityFilter {
    store: PatternStore,
    config: FilterConfig,
    matcher: Matcher,
    normalizer: Normalizer,
    /// Patterns of the stored configuration.
    active: ActivePatternSet,
}

impl ProfanityFilter {
    /// Creates a filter over every built-in language with default options.
    ///
    /// Example usage:
    ///
    /// ```
    /// use censore::ProfanityFilter;
    ///
    /// let filter = ProfanityFilter::new()?;
    ///
    /// assert!(filter.contains_profanity("хуєсос"));
    /// # Ok::<(), censore::Error>(())
    /// ```
    pub fn new() -> Result<Self> {
        ProfanityFilterBuilder::new().build()
    }

    #[inline]
    pub fn builder() -> ProfanityFilterBuilder {
        ProfanityFilterBuilder::new()
    }

    pub(crate) fn from_parts(
        store: PatternStore,
        config: FilterConfig,
        matcher: Matcher,
    ) -> Result<Self> {
        let active = store.merge(config.languages(), config.custom_shared())?;
        tracing::debug!(languages = ?config.languages(), "created profanity filter");
        Ok(Self {
            store,
            config,
            matcher,
            normalizer: Normalizer::default(),
            active,
        })
    }

    /// The stored configuration.
    #[inline]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// The default languages, sorted.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut languages = self.config.languages().iter().cloned().collect::<Vec<_>>();
        languages.sort();
        languages
    }

    /// Every language this filter can use: its loader's languages and every custom language,
    /// sorted.
    pub fn available_languages(&self) -> Vec<LanguageCode> {
        self.store.languages()
    }

    fn pipeline<'a>(&self, active: &'a ActivePatternSet) -> Pipeline<'a> {
        Pipeline::new(active, self.matcher, self.normalizer)
    }

    /// The patterns in effect for one call configured by `config`.
    fn active_with(
        &self,
        config: &FilterConfig,
        overrides: &Overrides,
    ) -> Result<ActivePatternSet> {
        if overrides.changes_patterns() {
            self.store.merge(config.languages(), config.custom_shared())
        } else {
            Ok(self.active.clone())
        }
    }

    /// Censors every profane word in `text`.
    ///
    /// The output has as many characters as `text`. Only profane words change.
    ///
    /// Example usage:
    ///
    /// ```
    /// use censore::ProfanityFilter;
    ///
    /// let filter = ProfanityFilter::new()?;
    ///
    /// assert_eq!(filter.censor("@ssh0l3 and d1ck"), "####### and ####");
    /// # Ok::<(), censore::Error>(())
    /// ```
    pub fn censor(&self, text: &str) -> String {
        self.pipeline(&self.active).censor(text, &self.config.censor_style())
    }

    /// Like [`censor()`], with `overrides` applied for this call.
    ///
    /// Fails if an override is invalid or names a language that cannot be loaded.
    ///
    /// [`censor()`]: ProfanityFilter::censor
    pub fn censor_with(&self, text: &str, overrides: &Overrides) -> Result<String> {
        let config = self.config.with_overrides(overrides)?;
        let active = self.active_with(&config, overrides)?;
        Ok(self.pipeline(&active).censor(text, &config.censor_style()))
    }

    /// Returns whether any word in `text` is profane.
    pub fn contains_profanity(&self, text: &str) -> bool {
        self.pipeline(&self.active).contains(text)
    }

    /// Like [`contains_profanity()`], with `overrides` applied for this call.
    ///
    /// Censor options of `overrides` are ignored.
    ///
    /// [`contains_profanity()`]: ProfanityFilter::contains_profanity
    pub fn contains_profanity_with(&self, text: &str, overrides: &Overrides) -> Result<bool> {
        let config = self.config.with_pattern_overrides(overrides)?;
        let active = self.active_with(&config, overrides)?;
        Ok(self.pipeline(&active).contains(text))
    }

    /// Every profane word in `text`, in order of appearance.
    ///
    /// Example usage:
    ///
    /// ```
    /// use censore::ProfanityFilter;
    ///
    /// let filter = ProfanityFilter::new()?;
    /// let text = "what the f.u.c.k";
    /// let found = filter.find(text);
    ///
    /// assert_eq!(found.len(), 1);
    /// assert_eq!(found[0].word, "f.u.c.k");
    /// assert_eq!(&text[found[0].range.clone()], "f.u.c.k");
    /// # Ok::<(), censore::Error>(())
    /// ```
    pub fn find<'t>(&self, text: &'t str) -> Vec<Match<'t>> {
        self.pipeline(&self.active).find(text)
    }

    /// Like [`find()`], ignoring the censor options of `overrides`.
    ///
    /// [`find()`]: ProfanityFilter::find
    pub fn find_with<'t>(&self, text: &'t str, overrides: &Overrides) -> Result<Vec<Match<'t>>> {
        let config = self.config.with_pattern_overrides(overrides)?;
        let active = self.active_with(&config, overrides)?;
        Ok(self.pipeline(&active).find(text))
    }

    /// Returns whether the single word `word` is profane.
    ///
    /// `word` is not split, so punctuation anywhere in it is ignored.
    pub fn is_profane(&self, word: &str) -> bool {
        self.pipeline(&self.active).is_profane(word)
    }

    /// Censors `word` unconditionally using the stored censor options.
    pub fn censor_word(&self, word: &str) -> String {
        self.config.censor_style().apply(word)
    }

    /// Censors `word` unconditionally. Only the censor options of `overrides` are used.
    pub fn censor_word_with(&self, word: &str, overrides: &Overrides) -> Result<String> {
        Ok(self.config.censor_style_with(overrides)?.apply(word))
    }

    /// Registers `language` with exactly the given entries and adds it to the default languages.
    ///
    /// Any existing data for `language`, built-in or custom, is replaced.
    pub fn add_custom_language<I, S, J, T>(
        &mut self,
        language: &str,
        patterns: I,
        exclude_patterns: J,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let language = LanguageCode::new(language)?;
        self.store.register_custom(&language, patterns, exclude_patterns)?;
        self.config.add_language(language);
        self.refresh()
    }

    /// Adds entries to `language` and adds it to the default languages.
    ///
    /// `language` defaults to [`LanguageCode::CUSTOM`]. Existing entries of the language are
    /// kept.
    pub fn add_custom_profanity_patterns<I, S, J, T>(
        &mut self,
        patterns: I,
        exclude_patterns: J,
        language: Option<&str>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let language = LanguageCode::new(language.unwrap_or(LanguageCode::CUSTOM))?;
        self.store.extend_custom(&language, patterns, exclude_patterns)?;
        self.config.add_language(language);
        self.refresh()
    }

    fn refresh(&mut self) -> Result<()> {
        self.active = self.store.merge(self.config.languages(), self.config.custom_shared())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, LanguageCode, Overrides, ProfanityFilter};

    fn code(code: &str) -> LanguageCode {
        LanguageCode::new(code).unwrap()
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<ProfanityFilter>();
    }

    #[test]
    fn censor() {
        let filter = ProfanityFilter::new().unwrap();

        assert_eq!(filter.censor("fuck you"), "#### you");
        assert_eq!(filter.censor("@ssh0l3 and d1ck"), "####### and ####");
    }

    #[test]
    fn is_profane() {
        let filter = ProfanityFilter::new().unwrap();

        assert!(filter.is_profane("fuck3r"));
        assert!(!filter.is_profane("cockpit"));
        assert!(!filter.is_profane("hello"));
    }

    #[test]
    fn censor_word() {
        let filter = ProfanityFilter::new().unwrap();

        assert_eq!(filter.censor_word("@ssh0l3"), "#######");
        assert_eq!(filter.censor_word("hello"), "#####");
        assert_eq!(
            filter
                .censor_word_with("anyword", &Overrides::new().partial_censor(true))
                .unwrap(),
            "a#####d"
        );
    }

    #[test]
    fn find() {
        let filter = ProfanityFilter::new().unwrap();
        let found = filter.find("you bastard, you b1tch");

        assert_eq!(
            found.iter().map(|found| found.word).collect::<Vec<_>>(),
            vec!["bastard", "b1tch"]
        );
        assert_eq!(found[1].range, 17..22);
    }

    #[test]
    fn add_custom_language() {
        let mut filter = ProfanityFilter::builder().language("en").build().unwrap();
        filter
            .add_custom_language("zz", &["blorp"], &["blorpington"])
            .unwrap();

        assert_eq!(filter.languages(), vec![code("en"), code("zz")]);
        assert!(filter.available_languages().contains(&code("zz")));
        assert_eq!(filter.censor("blorp blorpington"), "##### blorpington");
    }

    #[test]
    fn add_custom_language_replaces() {
        let mut filter = ProfanityFilter::builder().language("en").build().unwrap();
        filter
            .add_custom_language("en", &["blorp"], &[] as &[&str])
            .unwrap();

        assert!(filter.contains_profanity("blorp"));
        assert!(!filter.contains_profanity("fuck"));
    }

    #[test]
    fn add_custom_profanity_patterns() {
        let mut filter = ProfanityFilter::builder().language("en").build().unwrap();
        filter
            .add_custom_profanity_patterns(&["lololo"], &[] as &[&str], None)
            .unwrap();
        filter
            .add_custom_profanity_patterns(&["abc"], &[] as &[&str], None)
            .unwrap();

        assert_eq!(filter.languages(), vec![code("custom"), code("en")]);
        assert_eq!(filter.censor("lololo abc fuck"), "###### ### ####");
    }

    #[test]
    fn add_custom_profanity_patterns_extends_language() {
        let mut filter = ProfanityFilter::builder().language("en").build().unwrap();
        filter
            .add_custom_profanity_patterns(&["lololo"], &["fuckstation"], Some("en"))
            .unwrap();

        assert_eq!(filter.languages(), vec![code("en")]);
        assert!(filter.contains_profanity("lololo"));
        assert!(filter.contains_profanity("fuck"));
        assert!(!filter.contains_profanity("fuckstation"));
    }

    #[test]
    fn add_custom_rejects_all() {
        let mut filter = ProfanityFilter::new().unwrap();

        assert!(matches!(
            filter.add_custom_language("all", &["foo"], &[] as &[&str]),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn overrides_do_not_persist() {
        let filter = ProfanityFilter::builder().language("en").build().unwrap();
        let overrides = Overrides::new()
            .additional_languages(&["uk"])
            .custom_patterns(&["lololo"])
            .censor_symbol("*");

        assert_eq!(
            filter.censor_with("lololo хуй", &overrides).unwrap(),
            "****** ***"
        );
        assert_eq!(filter.censor("lololo хуй"), "lololo хуй");
    }

    #[test]
    fn overrides_unknown_language() {
        let filter = ProfanityFilter::new().unwrap();

        assert!(matches!(
            filter.contains_profanity_with("text", &Overrides::new().languages(&["xx"])),
            Err(Error::UnknownLanguage(_))
        ));
    }
}

//! Per-language pattern sets and the store that caches them.
//!
//! A [`PatternSet`] is immutable once built and shared behind an [`Arc`]. The [`PatternStore`]
//! loads each language from its [`PatternLoader`] the first time it is requested and serves the
//! cached set afterwards. Filtering calls combine several sets into an [`ActivePatternSet`], which
//! only holds references to the shared sets.

use crate::{
    error::{Error, Result},
    language::LanguageCode,
    loader::{ListKind, PatternLoader},
};
use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;
use std::{fmt, sync::Arc};

fn normalize_entries<I, S>(entries: I) -> Result<HashSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                Err(Error::InvalidConfiguration(
                    "pattern entries must not be empty".to_owned(),
                ))
            } else {
                Ok(entry.to_lowercase())
            }
        })
        .collect()
}

/// An immutable set of profanity patterns and exclusion patterns.
///
/// Entries are lowercase, trimmed and non-empty. An entry is never both a pattern and an
/// exclusion: if it is given as both, it is kept only as an exclusion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: HashSet<String>,
    exclude_patterns: HashSet<String>,
}

impl PatternSet {
    /// Creates a set from caller-supplied entries.
    ///
    /// Entries are trimmed and lowercased, and duplicates collapse. Fails with
    /// [`Error::InvalidConfiguration`] if an entry is empty after trimming.
    pub fn new<I, S, J, T>(patterns: I, exclude_patterns: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Ok(Self::from_entries(
            normalize_entries(patterns)?,
            normalize_entries(exclude_patterns)?,
        ))
    }

    /// Creates a set from entries that are already normalized.
    fn from_entries(mut patterns: HashSet<String>, exclude_patterns: HashSet<String>) -> Self {
        patterns.retain(|pattern| {
            let ambiguous = exclude_patterns.contains(pattern);
            if ambiguous {
                tracing::warn!(
                    %pattern,
                    "entry is both a pattern and an exclusion, keeping the exclusion"
                );
            }
            !ambiguous
        });
        Self {
            patterns,
            exclude_patterns,
        }
    }

    /// Iterates over the profanity patterns, in no particular order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(String::as_str)
    }

    /// Iterates over the exclusion patterns, in no particular order.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.exclude_patterns.iter().map(String::as_str)
    }

    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }

    pub fn contains_exclude_pattern(&self, exclude_pattern: &str) -> bool {
        self.exclude_patterns.contains(exclude_pattern)
    }

    /// Returns whether the set has neither patterns nor exclusions.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.exclude_patterns.is_empty()
    }

    /// Returns a new set containing the entries of both sets.
    pub fn union(&self, other: &PatternSet) -> PatternSet {
        Self::from_entries(
            self.patterns.union(&other.patterns).cloned().collect(),
            self.exclude_patterns
                .union(&other.exclude_patterns)
                .cloned()
                .collect(),
        )
    }
}

/// The patterns and exclusions in effect for a single filtering call.
///
/// This is a union of several [`PatternSet`]s. The sets are shared rather than copied, so
/// building one per call is cheap regardless of list sizes.
#[derive(Clone, Debug, Default)]
pub struct ActivePatternSet {
    sets: Vec<Arc<PatternSet>>,
}

impl ActivePatternSet {
    pub fn new(sets: Vec<Arc<PatternSet>>) -> Self {
        Self { sets }
    }

    /// Iterates over the patterns of every set. Entries shared by several sets repeat.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().flat_map(|set| set.patterns())
    }

    /// Iterates over the exclusions of every set. Entries shared by several sets repeat.
    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.sets.iter().flat_map(|set| set.exclude_patterns())
    }

    /// Returns whether no set contributes any pattern.
    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(|set| set.patterns.is_empty())
    }
}

/// Owns every language's [`PatternSet`], loading each lazily.
///
/// Loading is guarded so that each language is read from the loader at most once, even when
/// several threads request it at the same time.
pub struct PatternStore {
    loader: Box<dyn PatternLoader>,
    sets: RwLock<HashMap<LanguageCode, Arc<PatternSet>>>,
}

impl PatternStore {
    /// Creates an empty store backed by `loader`.
    pub fn new<L>(loader: L) -> Self
    where
        L: PatternLoader + 'static,
    {
        Self::from_boxed(Box::new(loader))
    }

    pub(crate) fn from_boxed(loader: Box<dyn PatternLoader>) -> Self {
        Self {
            loader,
            sets: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self, language: &LanguageCode) -> Result<PatternSet> {
        if language.is_all() || !self.loader.contains(language) {
            return Err(Error::UnknownLanguage(language.clone()));
        }
        let patterns = self.loader.load(language, ListKind::Patterns)?;
        let exclude_patterns = self.loader.load(language, ListKind::ExcludePatterns)?;
        let set = PatternSet::from_entries(
            patterns.into_iter().collect(),
            exclude_patterns.into_iter().collect(),
        );
        tracing::debug!(
            %language,
            patterns = set.patterns.len(),
            exclude_patterns = set.exclude_patterns.len(),
            "loaded pattern set"
        );
        Ok(set)
    }

    /// Returns the set for `language`, loading it on first use.
    ///
    /// Fails with [`Error::UnknownLanguage`] if the language is neither known to the loader nor
    /// registered as a custom language, and with [`Error::MissingLanguageData`] if the loader
    /// cannot read it.
    pub fn load(&self, language: &LanguageCode) -> Result<Arc<PatternSet>> {
        if let Some(set) = self.sets.read().get(language) {
            return Ok(Arc::clone(set));
        }

        let mut sets = self.sets.write();
        // Another thread may have loaded it while the lock was released.
        if let Some(set) = sets.get(language) {
            return Ok(Arc::clone(set));
        }
        let set = Arc::new(self.read(language)?);
        sets.insert(language.clone(), Arc::clone(&set));
        Ok(set)
    }

    /// Registers `language` with the given entries, replacing any existing set.
    pub fn register_custom<I, S, J, T>(
        &self,
        language: &LanguageCode,
        patterns: I,
        exclude_patterns: J,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        reject_all(language)?;
        let set = PatternSet::new(patterns, exclude_patterns)?;
        tracing::debug!(
            %language,
            patterns = set.patterns.len(),
            exclude_patterns = set.exclude_patterns.len(),
            "registered custom language"
        );
        self.sets.write().insert(language.clone(), Arc::new(set));
        Ok(())
    }

    /// Adds the given entries to `language`'s existing set.
    ///
    /// If the loader has data for `language`, that data is loaded first and extended. Otherwise
    /// a new custom language is created.
    pub fn extend_custom<I, S, J, T>(
        &self,
        language: &LanguageCode,
        patterns: I,
        exclude_patterns: J,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        J: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        reject_all(language)?;
        let addition = PatternSet::new(patterns, exclude_patterns)?;

        let mut sets = self.sets.write();
        let set = match sets.get(language) {
            Some(existing) => existing.union(&addition),
            None if self.loader.contains(language) => self.read(language)?.union(&addition),
            None => addition,
        };
        tracing::debug!(
            %language,
            patterns = set.patterns.len(),
            exclude_patterns = set.exclude_patterns.len(),
            "extended custom language"
        );
        sets.insert(language.clone(), Arc::new(set));
        Ok(())
    }

    /// Every language this store can resolve: the loader's languages plus custom ones, sorted.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut languages = self.loader.languages();
        languages.extend(self.sets.read().keys().cloned());
        languages.sort();
        languages.dedup();
        languages
    }

    /// Combines `languages` and `extra` into an [`ActivePatternSet`].
    ///
    /// If `languages` contains [`LanguageCode::ALL`], every language in [`languages()`] is used.
    /// Every language is resolved before returning, so unknown languages are reported here.
    ///
    /// [`languages()`]: PatternStore::languages
    pub fn merge<'a, I>(&self, languages: I, extra: &Arc<PatternSet>) -> Result<ActivePatternSet>
    where
        I: IntoIterator<Item = &'a LanguageCode>,
    {
        let mut selected = languages.into_iter().cloned().collect::<Vec<_>>();
        if selected.iter().any(LanguageCode::is_all) {
            selected = self.languages();
        }
        selected.sort();
        selected.dedup();

        let mut sets = selected
            .iter()
            .map(|language| self.load(language))
            .collect::<Result<Vec<_>>>()?;
        if !extra.is_empty() {
            sets.push(Arc::clone(extra));
        }
        Ok(ActivePatternSet::new(sets))
    }
}

impl fmt::Debug for PatternStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternStore")
            .field("loaded", &self.sets.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

fn reject_all(language: &LanguageCode) -> Result<()> {
    if language.is_all() {
        Err(Error::InvalidConfiguration(format!(
            "`{}` is reserved and cannot name a custom language",
            LanguageCode::ALL
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, Result},
        language::LanguageCode,
        loader::{BuiltinLoader, ListKind, PatternLoader},
        store::{ActivePatternSet, PatternSet, PatternStore},
    };
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        thread,
    };

    fn code(code: &str) -> LanguageCode {
        LanguageCode::new(code).unwrap()
    }

    /// Wraps the built-in loader, counting how often lists are read.
    #[derive(Default)]
    struct CountingLoader {
        loads: Arc<AtomicUsize>,
    }

    impl PatternLoader for CountingLoader {
        fn languages(&self) -> Vec<LanguageCode> {
            BuiltinLoader.languages()
        }

        fn contains(&self, language: &LanguageCode) -> bool {
            BuiltinLoader.contains(language)
        }

        fn load(&self, language: &LanguageCode, kind: ListKind) -> Result<Vec<String>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            BuiltinLoader.load(language, kind)
        }
    }

    #[test]
    fn pattern_set_normalizes_entries() {
        let set = PatternSet::new(&[" Foo", "foo", "BAR "], &["Baz"]).unwrap();

        let mut patterns = set.patterns().collect::<Vec<_>>();
        patterns.sort_unstable();
        assert_eq!(patterns, vec!["bar", "foo"]);
        assert!(set.contains_exclude_pattern("baz"));
    }

    #[test]
    fn pattern_set_rejects_empty_entries() {
        assert!(matches!(
            PatternSet::new(&["foo", "   "], &[] as &[&str]),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn pattern_set_ambiguous_entry_is_exclusion() {
        let set = PatternSet::new(&["foo", "bar"], &["foo"]).unwrap();

        assert!(!set.contains_pattern("foo"));
        assert!(set.contains_pattern("bar"));
        assert!(set.contains_exclude_pattern("foo"));
    }

    #[test]
    fn pattern_set_union() {
        let a = PatternSet::new(&["foo"], &["bar"]).unwrap();
        let b = PatternSet::new(&["bar", "baz"], &["qux"]).unwrap();
        let union = a.union(&b);

        assert!(union.contains_pattern("foo"));
        assert!(union.contains_pattern("baz"));
        assert!(!union.contains_pattern("bar"));
        assert!(union.contains_exclude_pattern("bar"));
        assert!(union.contains_exclude_pattern("qux"));
    }

    #[test]
    fn load_is_cached() {
        let loader = CountingLoader::default();
        let loads = Arc::clone(&loader.loads);
        let store = PatternStore::new(loader);

        let first = store.load(&code("en")).unwrap();
        let second = store.load(&code("EN")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_load_reads_once() {
        let loader = CountingLoader::default();
        let loads = Arc::clone(&loader.loads);
        let store = PatternStore::new(loader);

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| store.load(&code("uk")).unwrap());
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn load_unknown_language() {
        let store = PatternStore::new(BuiltinLoader);

        assert!(matches!(
            store.load(&code("xx")),
            Err(Error::UnknownLanguage(language)) if language.as_str() == "xx"
        ));
        assert!(matches!(
            store.load(&code("all")),
            Err(Error::UnknownLanguage(_))
        ));
    }

    #[test]
    fn register_custom_replaces() {
        let store = PatternStore::new(BuiltinLoader);
        store
            .register_custom(&code("en"), &["lololo"], &[] as &[&str])
            .unwrap();

        let set = store.load(&code("en")).unwrap();
        assert!(set.contains_pattern("lololo"));
        assert!(!set.contains_pattern("fuck"));
    }

    #[test]
    fn register_custom_rejects_all() {
        let store = PatternStore::new(BuiltinLoader);

        assert!(matches!(
            store.register_custom(&code("all"), &["foo"], &[] as &[&str]),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn extend_custom_builtin() {
        let store = PatternStore::new(BuiltinLoader);
        store
            .extend_custom(&code("en"), &["lololo"], &["fuckstation"])
            .unwrap();

        let set = store.load(&code("en")).unwrap();
        assert!(set.contains_pattern("lololo"));
        assert!(set.contains_pattern("fuck"));
        assert!(set.contains_exclude_pattern("fuckstation"));
    }

    #[test]
    fn extend_custom_new_language() {
        let store = PatternStore::new(BuiltinLoader);
        store.extend_custom(&code("custom"), &["foo"], &[] as &[&str]).unwrap();
        store.extend_custom(&code("custom"), &["bar"], &[] as &[&str]).unwrap();

        let set = store.load(&code("custom")).unwrap();
        assert!(set.contains_pattern("foo"));
        assert!(set.contains_pattern("bar"));
    }

    #[test]
    fn languages_include_custom() {
        let store = PatternStore::new(BuiltinLoader);
        store.register_custom(&code("zz"), &["foo"], &[] as &[&str]).unwrap();

        assert_eq!(
            store.languages(),
            vec![code("en"), code("ru"), code("uk"), code("zz")]
        );
    }

    #[test]
    fn merge_languages() {
        let store = PatternStore::new(BuiltinLoader);
        let extra = Arc::new(PatternSet::new(&["lololo"], &[] as &[&str]).unwrap());

        let active = store.merge(&[code("en")], &extra).unwrap();

        assert!(active.patterns().any(|pattern| pattern == "fuck"));
        assert!(active.patterns().any(|pattern| pattern == "lololo"));
        assert!(!active.patterns().any(|pattern| pattern == "хуй"));
    }

    #[test]
    fn merge_all() {
        let store = PatternStore::new(BuiltinLoader);

        let active = store
            .merge(&[code("all")], &Arc::new(PatternSet::default()))
            .unwrap();

        assert!(active.patterns().any(|pattern| pattern == "fuck"));
        assert!(active.patterns().any(|pattern| pattern == "хуєсос"));
    }

    #[test]
    fn active_pattern_set_is_empty() {
        let exclusions_only = Arc::new(PatternSet::new(&[] as &[&str], &["foo"]).unwrap());
        let patterns = Arc::new(PatternSet::new(&["bar"], &[] as &[&str]).unwrap());

        assert!(ActivePatternSet::default().is_empty());
        assert!(ActivePatternSet::new(vec![Arc::clone(&exclusions_only)]).is_empty());
        assert!(!ActivePatternSet::new(vec![exclusions_only, patterns]).is_empty());
    }

    #[test]
    fn merge_unknown_language() {
        let store = PatternStore::new(BuiltinLoader);

        assert!(matches!(
            store.merge(&[code("en"), code("xx")], &Arc::new(PatternSet::default())),
            Err(Error::UnknownLanguage(_))
        ));
    }
}

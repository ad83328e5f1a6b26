//! Backing stores for per-language pattern lists.
//!
//! A [`PatternLoader`] supplies the raw profanity and exclusion lists for a language. Lists are
//! plain UTF-8 text with one entry per line. Blank lines and lines starting with `#` are ignored,
//! and every entry is trimmed and lowercased on read.
//!
//! Two loaders are provided: [`BuiltinLoader`], which serves lists compiled into the crate, and
//! [`DirectoryLoader`], which reads `patterns/<code>.txt` and `exclude_patterns/<code>.txt` from a
//! directory.

use crate::{
    error::{Error, Result},
    language::LanguageCode,
};
use core::fmt;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Which of a language's two lists is being loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Profanity patterns, matched by substring containment.
    Patterns,
    /// Exclusion patterns, overriding pattern matches.
    ExcludePatterns,
}

impl ListKind {
    /// The directory name this list is stored under.
    pub fn directory(self) -> &'static str {
        match self {
            ListKind::Patterns => "patterns",
            ListKind::ExcludePatterns => "exclude_patterns",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListKind::Patterns => "pattern",
            ListKind::ExcludePatterns => "exclude pattern",
        })
    }
}

/// A source of per-language pattern lists.
///
/// Implementations are consulted by the [`PatternStore`] at most once per language and list.
///
/// [`PatternStore`]: crate::store::PatternStore
pub trait PatternLoader: Send + Sync {
    /// Every language this loader has data for.
    fn languages(&self) -> Vec<LanguageCode>;

    /// Returns whether this loader has data for `language`.
    fn contains(&self, language: &LanguageCode) -> bool;

    /// Loads one list for `language`.
    ///
    /// Returns trimmed, lowercase, non-empty entries in file order. Fails with
    /// [`Error::MissingLanguageData`] if the list cannot be read.
    fn load(&self, language: &LanguageCode, kind: ListKind) -> Result<Vec<String>>;
}

/// Parses list text into entries.
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Built-in lists: `(code, patterns, exclude_patterns)`.
const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "en",
        include_str!("../data/patterns/en.txt"),
        include_str!("../data/exclude_patterns/en.txt"),
    ),
    (
        "ru",
        include_str!("../data/patterns/ru.txt"),
        include_str!("../data/exclude_patterns/ru.txt"),
    ),
    (
        "uk",
        include_str!("../data/patterns/uk.txt"),
        include_str!("../data/exclude_patterns/uk.txt"),
    ),
];

/// Serves the lists compiled into this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinLoader;

impl PatternLoader for BuiltinLoader {
    fn languages(&self) -> Vec<LanguageCode> {
        BUILTIN
            .iter()
            .filter_map(|(code, _, _)| LanguageCode::new(code).ok())
            .collect()
    }

    fn contains(&self, language: &LanguageCode) -> bool {
        BUILTIN.iter().any(|(code, _, _)| *code == language.as_str())
    }

    fn load(&self, language: &LanguageCode, kind: ListKind) -> Result<Vec<String>> {
        let (_, patterns, exclude_patterns) = BUILTIN
            .iter()
            .find(|(code, _, _)| *code == language.as_str())
            .ok_or_else(|| Error::MissingLanguageData {
                language: language.clone(),
                kind,
                source: io::Error::new(io::ErrorKind::NotFound, "no built-in list"),
            })?;
        Ok(parse_lines(match kind {
            ListKind::Patterns => patterns,
            ListKind::ExcludePatterns => exclude_patterns,
        }))
    }
}

/// Reads lists from a directory on disk.
///
/// The directory is expected to contain `patterns/<code>.txt` for every language, and
/// `exclude_patterns/<code>.txt` alongside it. A language is known if its pattern file exists.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    /// Creates a loader reading from `root`.
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    /// The directory this loader reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, language: &LanguageCode, kind: ListKind) -> Option<PathBuf> {
        // Codes become file names, so anything resembling a path is rejected.
        if !language
            .as_str()
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(
            self.root
                .join(kind.directory())
                .join(format!("{}.txt", language)),
        )
    }
}

impl PatternLoader for DirectoryLoader {
    fn languages(&self) -> Vec<LanguageCode> {
        let entries = match fs::read_dir(self.root.join(ListKind::Patterns.directory())) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(
                    root = %self.root.display(),
                    %error,
                    "cannot list pattern directory"
                );
                return Vec::new();
            }
        };
        let mut languages = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().map_or(false, |extension| extension == "txt"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| LanguageCode::new(stem).ok())
            })
            .collect::<Vec<_>>();
        languages.sort();
        languages
    }

    fn contains(&self, language: &LanguageCode) -> bool {
        self.path(language, ListKind::Patterns)
            .map_or(false, |path| path.is_file())
    }

    fn load(&self, language: &LanguageCode, kind: ListKind) -> Result<Vec<String>> {
        let path = self
            .path(language, kind)
            .ok_or_else(|| Error::MissingLanguageData {
                language: language.clone(),
                kind,
                source: io::Error::new(io::ErrorKind::InvalidInput, "invalid language code"),
            })?;
        fs::read_to_string(&path)
            .map(|text| parse_lines(&text))
            .map_err(|source| Error::MissingLanguageData {
                language: language.clone(),
                kind,
                source,
            })
    }
}

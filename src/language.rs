//! Language identifiers.

use crate::error::{Error, Result};
use core::{borrow::Borrow, fmt, str::FromStr};

/// A case-insensitive language identifier, such as `"en"` or `"uk"`.
///
/// Codes are stored trimmed and lowercased, so `"EN"` and `" en "` name the same language. The
/// reserved code [`LanguageCode::ALL`] selects every language a filter can resolve.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// The reserved code selecting every available language.
    pub const ALL: &'static str = "all";

    /// The language custom patterns are registered under when no other is given.
    pub const CUSTOM: &'static str = "custom";

    /// Creates a new `LanguageCode`.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if `code` is empty after trimming.
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::InvalidConfiguration(
                "language code must not be empty".to_owned(),
            ));
        }
        Ok(Self(code.to_lowercase()))
    }

    /// Returns the lowercased code.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this is the reserved [`LanguageCode::ALL`] code.
    #[inline]
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self> {
        Self::new(code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Parses every code in `codes`, failing on the first invalid one.
pub(crate) fn parse_all<I, S>(codes: I) -> Result<Vec<LanguageCode>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    codes
        .into_iter()
        .map(|code| LanguageCode::new(code.as_ref()))
        .collect()
}

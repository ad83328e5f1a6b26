//! Errors surfaced by a [`ProfanityFilter`].
//!
//! Every error is reported before any text is processed: languages are resolved and per-call
//! options are validated up front, so a failed call never produces partial output. Input text
//! itself never causes an error.
//!
//! [`ProfanityFilter`]: crate::ProfanityFilter

use crate::{language::LanguageCode, loader::ListKind};
use std::io;
use thiserror::Error;

/// The error type for all fallible filter operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The language has neither built-in data nor a registered custom set.
    #[error("unknown language `{0}`")]
    UnknownLanguage(LanguageCode),

    /// The loader knows the language but could not read one of its lists.
    #[error("missing {kind} data for language `{language}`")]
    MissingLanguageData {
        language: LanguageCode,
        kind: ListKind,
        #[source]
        source: io::Error,
    },

    /// A configuration value was rejected, such as a multi-character censor symbol or a
    /// pattern that is empty after trimming.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// A `Result` alias defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

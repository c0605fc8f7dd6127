//! Errors raised while loading word lists.
//!
//! The trie itself never returns errors: misuse is a panic, a word that is
//! not made of letters is skipped, and a missing word is `None`.

use std::io;
use std::path::PathBuf;

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading a word list from a file failed.
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a word list from a stream failed.
    #[error("failed to read word list: {0}")]
    Read(#[from] io::Error),
}

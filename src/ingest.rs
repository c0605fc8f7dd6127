//! Building a trie from a whitespace-separated word list.
//!
//! Each token's 1-based position in the stream becomes its first occurrence.
//! Tokens that are not made of ASCII letters still advance the position,
//! including tokens that are not valid UTF-8.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::payload::Positions;
use crate::trie::{InsertOutcome, ReducedTrie};
use crate::Config;

/// Counts gathered while reading a word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Tokens read.
    pub tokens: usize,
    /// Tokens that created a new word.
    pub created: usize,
    /// Tokens that added a position to a known word.
    pub merged: usize,
    /// Tokens skipped for containing something other than letters.
    pub rejected: usize,
}

/// Read every token from `reader` into a new trie.
pub fn read_words<R: BufRead>(reader: R) -> Result<ReducedTrie<Positions>> {
    read_words_with(reader, Config::default()).map(|(trie, _)| trie)
}

/// Like [`read_words`], with a configuration, also returning counts.
pub fn read_words_with<R: BufRead>(
    reader: R,
    config: Config,
) -> Result<(ReducedTrie<Positions>, IngestStats)> {
    let mut trie = ReducedTrie::with_config(config);
    let mut stats = IngestStats::default();

    for line in reader.split(b'\n') {
        let line = line?;
        for token in line
            .split(u8::is_ascii_whitespace)
            .filter(|token| !token.is_empty())
        {
            stats.tokens += 1;
            let Ok(token) = std::str::from_utf8(token) else {
                debug!("skipping non-UTF-8 token at position {}", stats.tokens);
                stats.rejected += 1;
                continue;
            };
            match trie.insert(token, Positions::new(stats.tokens)) {
                InsertOutcome::Created => stats.created += 1,
                InsertOutcome::Merged => stats.merged += 1,
                InsertOutcome::Rejected => stats.rejected += 1,
            }
        }
    }

    info!(
        "indexed {} words from {} tokens ({} skipped)",
        trie.len(),
        stats.tokens,
        stats.rejected
    );
    Ok((trie, stats))
}

/// Read the word list at `path`.
pub fn load_words(path: impl AsRef<Path>) -> Result<ReducedTrie<Positions>> {
    load_words_with(path, Config::default()).map(|(trie, _)| trie)
}

/// Like [`load_words`], with a configuration, also returning counts.
pub fn load_words_with(
    path: impl AsRef<Path>,
    config: Config,
) -> Result<(ReducedTrie<Positions>, IngestStats)> {
    let path = path.as_ref();
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    info!("reading word list {}", path.display());
    read_words_with(BufReader::new(file), config).map_err(|e| match e {
        Error::Read(source) => io_err(source),
        other => other,
    })
}

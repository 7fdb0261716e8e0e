//! Word sources for the list.
//!
//! A [`DictionarySource`] hands back the full, ordered word list every time
//! it is asked. Filtering and windowing happen downstream.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BUILTIN_WORDS: &str = include_str!("words.txt");

/// Failure to load a word list.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplies the ordered sequence of words to browse.
///
/// Implementations must be deterministic: two calls without an intervening
/// change to the backing data return the same words in the same order.
pub trait DictionarySource: Send + Sync {
    fn words(&self) -> Vec<String>;
}

/// The word list compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDictionary;

impl DictionarySource for BuiltinDictionary {
    fn words(&self) -> Vec<String> {
        parse_words(BUILTIN_WORDS)
    }
}

/// An in-memory word list.
#[derive(Debug, Clone, Default)]
pub struct VecDictionary {
    words: Vec<String>,
}

impl VecDictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl DictionarySource for VecDictionary {
    fn words(&self) -> Vec<String> {
        self.words.clone()
    }
}

/// A word list read from a text file, one word per line.
///
/// The file is read once by [`open`](FileDictionary::open) so a missing or
/// unreadable file is reported up front. Later calls to
/// [`words`](DictionarySource::words) re-read it to pick up edits, and fall
/// back to the last good contents if that read fails.
#[derive(Debug)]
pub struct FileDictionary {
    path: PathBuf,
    last_good: std::sync::Mutex<Vec<String>>,
}

impl FileDictionary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref().to_path_buf();
        let words = read_words(&path)?;
        tracing::info!(path = %path.display(), count = words.len(), "word list loaded");
        Ok(Self {
            path,
            last_good: std::sync::Mutex::new(words),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionarySource for FileDictionary {
    fn words(&self) -> Vec<String> {
        let mut last_good = match self.last_good.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match read_words(&self.path) {
            Ok(words) => {
                *last_good = words.clone();
                words
            }
            Err(err) => {
                tracing::warn!(%err, "keeping previously loaded words");
                last_good.clone()
            }
        }
    }
}

fn read_words(path: &Path) -> Result<Vec<String>, DictionaryError> {
    let text = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_words(&text))
}

/// One word per line; surrounding whitespace is trimmed and blank lines are
/// skipped.
pub fn parse_words(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

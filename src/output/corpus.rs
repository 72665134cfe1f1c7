//! Corpus persistence
//!
//! Each saved article becomes `{prefix}_{ordinal}.txt` in the site's output
//! directory: UTF-8, title and body on one whitespace-collapsed line.
//! Ordinals come from the writer's own counter, so leftovers from an
//! earlier run in the same directory never affect numbering.

use crate::{OutputError, OutputResult};
use std::path::{Path, PathBuf};

/// One saved article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// 1-based position in save order
    pub ordinal: usize,
    /// Page title at save time
    pub title: String,
    /// Whitespace-normalized text exactly as written
    pub text: String,
    /// URL the article was fetched from
    pub url: String,
    /// File the text was written to
    pub path: PathBuf,
}

/// Writes numbered article files and remembers what it wrote
#[derive(Debug)]
pub struct CorpusWriter {
    directory: PathBuf,
    prefix: String,
    entries: Vec<CorpusEntry>,
}

impl CorpusWriter {
    /// Creates a writer, creating `directory` if it does not exist
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> OutputResult<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).map_err(|source| OutputError::Write {
            path: directory.display().to_string(),
            source,
        })?;

        Ok(Self {
            directory,
            prefix: prefix.into(),
            entries: Vec::new(),
        })
    }

    /// Normalizes and writes one article under the next ordinal
    ///
    /// # Arguments
    ///
    /// * `title` - Page title, recorded on the entry
    /// * `text` - Title plus body as extracted; whitespace is collapsed here
    /// * `url` - Source URL, recorded on the entry
    ///
    /// # Returns
    ///
    /// * `Ok(&CorpusEntry)` - The entry just written
    /// * `Err(OutputError::EmptyText)` - Text was blank; no ordinal consumed
    /// * `Err(OutputError::Write)` - The file could not be written
    pub fn save(&mut self, title: &str, text: &str, url: &str) -> OutputResult<&CorpusEntry> {
        let text = normalize_whitespace(text);
        if text.is_empty() {
            return Err(OutputError::EmptyText {
                url: url.to_string(),
            });
        }

        let ordinal = self.entries.len() + 1;
        let path = self.directory.join(file_name(&self.prefix, ordinal));

        std::fs::write(&path, text.as_bytes()).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        })?;

        self.entries.push(CorpusEntry {
            ordinal,
            title: title.to_string(),
            text,
            url: url.to_string(),
            path,
        });

        Ok(&self.entries[ordinal - 1])
    }

    /// Number of articles saved so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<CorpusEntry> {
        self.entries
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// File name of the article with the given ordinal
///
/// ```
/// use corpus_crawler::output::file_name;
///
/// assert_eq!(file_name("xinhuawang", 7), "xinhuawang_7.txt");
/// ```
pub fn file_name(prefix: &str, ordinal: usize) -> String {
    format!("{}_{}.txt", prefix, ordinal)
}

/// Collapses every whitespace run (newlines, tabs, ideographic spaces, ...)
/// into one ASCII space and trims both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

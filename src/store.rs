//! Defines the [`ArticleStore`], which owns the article list for the lifetime
//! of a page view, and the [`Source`] trait it loads from.
//!
//! Loading never fails from the caller's point of view: any problem fetching
//! or decoding the data file is logged and leaves the store empty, so every
//! page controller sees either a populated or an empty list.

use crate::article::{parse_display_date, Article};
use crate::category::Category;
use crate::page::{site_relative, Depth};
use log::{debug, error, warn};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// The data file's location relative to a root-level page.
pub const DATA_PATH: &str = "json/articles.json";

/// Fetches documents by page-relative path.
pub trait Source {
    fn fetch(&self, relative_path: &str) -> Result<Vec<u8>>;
}

/// A [`Source`] that reads from disk, resolving relative paths against the
/// directory containing the current page.
pub struct FileSource {
    page_directory: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(page_directory: P) -> FileSource {
        FileSource {
            page_directory: page_directory.into(),
        }
    }

    /// Creates a source for the page at `page_path` within `site_root`.
    pub fn for_page(site_root: &Path, page_path: &str) -> FileSource {
        let page = site_root.join(site_relative(page_path));
        match page.parent() {
            Some(dir) if page_path.trim_matches('/').contains('/') => FileSource::new(dir),
            _ => FileSource::new(site_root),
        }
    }
}

impl Source for FileSource {
    fn fetch(&self, relative_path: &str) -> Result<Vec<u8>> {
        let path = self.page_directory.join(relative_path);
        std::fs::read(&path).map_err(|err| Error::Io { path, err })
    }
}

/// The in-memory article list.
#[derive(Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    pub fn new() -> ArticleStore {
        ArticleStore::default()
    }

    /// Creates a store that already holds `articles`.
    pub fn with_articles(articles: Vec<Article>) -> ArticleStore {
        ArticleStore { articles }
    }

    /// The path of the data file relative to a page at `depth`.
    pub fn data_path(depth: Depth) -> String {
        format!("{}{}", depth.base_path(), DATA_PATH)
    }

    /// Replaces the article list with the contents of the data file. On
    /// failure the error is logged and the list is left empty.
    pub fn load<S: Source + ?Sized>(&mut self, source: &S, depth: Depth) {
        let path = ArticleStore::data_path(depth);
        match fetch_articles(source, &path) {
            Ok(articles) => {
                debug!("Loaded {} articles from `{}`", articles.len(), path);
                self.articles = articles;
                self.validate();
            }
            Err(err) => {
                error!("Loading articles from `{}`: {}", path, err);
                self.articles = Vec::new();
            }
        }
    }

    /// The current article list.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Logs records that will misbehave in listings: duplicate identifiers,
    /// categories outside the configuration, and unparseable dates. None of
    /// these are rejected.
    fn validate(&self) {
        let mut seen: HashSet<&str> = HashSet::new();
        for article in &self.articles {
            if !seen.insert(&article.id) {
                warn!(
                    "Duplicate article id `{}`; lookups will use the first record",
                    article.id
                );
            }
            if Category::from_name(&article.category).is_none() {
                warn!(
                    "Article `{}` has unknown category `{}`",
                    article.id, article.category
                );
            }
            if parse_display_date(&article.date).is_none() {
                warn!(
                    "Article `{}` has unparseable date `{}`; sorting it as the epoch",
                    article.id, article.date
                );
            }
        }
    }
}

fn fetch_articles<S: Source + ?Sized>(source: &S, path: &str) -> Result<Vec<Article>> {
    let body = source.fetch(path)?;
    Ok(serde_json::from_slice(&body)?)
}

/// The result of a fallible fetch.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem fetching or decoding the data file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the file couldn't be read.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned by sources that answer with a non-success status code.
    Status(u16),

    /// Returned when the body isn't a JSON list of articles.
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => write!(f, "reading '{}': {}", path.display(), err),
            Error::Status(code) => write!(f, "unexpected status {}", code),
            Error::Decode(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::Status(_) => None,
            Error::Decode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator when decoding the data file.
    fn from(err: serde_json::Error) -> Error {
        Error::Decode(err)
    }
}

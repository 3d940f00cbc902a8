//! Generates `sitemap.xml` for the built site. Every HTML file under the site
//! root becomes an entry whose change frequency and priority are chosen by
//! the top-level directory it lives in.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;
use walkdir::{DirEntry, WalkDir};

const HTML_EXTENSION: &str = ".html";
const INDEX_FILE: &str = "index.html";

/// Directories that never hold site pages.
const DEPENDENCY_DIRECTORIES: [&str; 1] = ["node_modules"];

/// How often a page is expected to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
        })
    }
}

/// A sitemap priority in tenths, so that `Priority(8)` is `0.8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority(pub u8);

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

const HOME: Priority = Priority(10);
const ARTICLE: Priority = Priority(8);
const CATEGORY: Priority = Priority(7);
const PAGE: Priority = Priority(6);
const OTHER: Priority = Priority(5);

/// Chooses the change frequency and priority for a page from its path
/// relative to the site root (with `/` separators).
pub fn policy(relative_path: &str) -> (ChangeFreq, Priority) {
    if relative_path == INDEX_FILE {
        (ChangeFreq::Daily, HOME)
    } else if relative_path.starts_with("articles/") {
        (ChangeFreq::Weekly, ARTICLE)
    } else if relative_path.starts_with("category/") {
        (ChangeFreq::Weekly, CATEGORY)
    } else if relative_path.starts_with("pages/") {
        (ChangeFreq::Monthly, PAGE)
    } else {
        (ChangeFreq::Monthly, OTHER)
    }
}

/// A single `<url>` entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The page's location relative to the site URL. Directory index pages
    /// are listed by directory, so the home page's location is empty.
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: Priority,
}

impl Entry {
    fn new(relative_path: String, lastmod: NaiveDate) -> Entry {
        let (changefreq, priority) = policy(&relative_path);
        let loc = if relative_path == INDEX_FILE {
            String::new()
        } else if relative_path.ends_with(&format!("/{}", INDEX_FILE)) {
            relative_path[..relative_path.len() - INDEX_FILE.len()].to_owned()
        } else {
            relative_path
        };
        Entry {
            loc,
            lastmod,
            changefreq,
            priority,
        }
    }
}

/// Walks `root` and returns an entry for every HTML file, ordered by
/// priority (highest first) and then location. Hidden directories and
/// dependency directories are skipped.
pub fn scan(root: &Path) -> Result<Vec<Entry>> {
    let today = Utc::now().naive_utc().date();
    let mut entries = Vec::new();
    for result in WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e))
    {
        let entry = result?;
        if !entry.file_type().is_file() || !file_name(&entry).ends_with(HTML_EXTENSION) {
            continue;
        }
        // strip_prefix shouldn't fail since `root` is an ancestor of every
        // walked entry
        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let lastmod = modified_date(entry.path()).unwrap_or(today);
        entries.push(Entry::new(slash_path(relative), lastmod));
    }
    sort(&mut entries);
    Ok(entries)
}

/// Orders entries by priority, highest first, then alphabetically by
/// location.
pub fn sort(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.loc.cmp(&b.loc)));
}

fn is_excluded(entry: &DirEntry) -> bool {
    let name = file_name(entry);
    entry.file_type().is_dir()
        && (name.starts_with('.') || DEPENDENCY_DIRECTORIES.contains(&&*name))
}

fn file_name(entry: &DirEntry) -> std::borrow::Cow<str> {
    entry.file_name().to_string_lossy()
}

fn slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn modified_date(path: &Path) -> Option<NaiveDate> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified).naive_utc().date())
}

/// The file `robots.txt` lives in, relative to the site root.
pub const ROBOTS_FILE: &str = "robots.txt";

const ROBOTS_SITEMAP_DIRECTIVE: &str = "Sitemap:";
const ROBOTS_SITEMAP_HEADING: &str = "# Sitemaps";

/// Resolves a location (relative to the site root) against `site_url`. The
/// empty location is the site URL itself.
fn absolute(site_url: &Url, loc: &str) -> String {
    let base = site_url.as_str().trim_end_matches('/');
    if loc.is_empty() {
        base.to_owned()
    } else {
        format!("{}/{}", base, loc)
    }
}

/// Renders the sitemap document. Locations are resolved against `site_url`.
pub fn to_xml(site_url: &Url, entries: &[Entry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for entry in entries {
        let loc = absolute(site_url, &entry.loc);
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", html_escape::encode_text(&loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod.format("%Y-%m-%d")));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Renders the plain-text sitemap: one absolute URL per line.
pub fn to_txt(site_url: &Url, entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|e| absolute(site_url, &e.loc) + "\n")
        .collect()
}

/// The plain-text sitemap's path for an XML sitemap written to `output`.
pub fn txt_path(output: &Path) -> PathBuf {
    output.with_extension("txt")
}

/// Rewrites a `robots.txt` document so that its sitemap directives point at
/// `sitemaps` (absolute URLs). Existing directives are replaced and every
/// other rule is kept. An empty document gets an allow-all rule.
pub fn update_robots(existing: &str, sitemaps: &[String]) -> String {
    let mut lines: Vec<&str> = existing
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.starts_with(ROBOTS_SITEMAP_DIRECTIVE) && line != ROBOTS_SITEMAP_HEADING
        })
        .collect();
    while lines.last().map_or(false, |line| line.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.extend(&["User-agent: *", "Allow: /"]);
    }

    let mut robots = lines.join("\n");
    robots.push_str("\n\n");
    robots.push_str(ROBOTS_SITEMAP_HEADING);
    robots.push('\n');
    for sitemap in sitemaps {
        robots.push_str(&format!("{} {}\n", ROBOTS_SITEMAP_DIRECTIVE, sitemap));
    }
    robots
}

/// The URL a file written under `root` is served from.
fn published_url(root: &Path, site_url: &Url, path: &Path) -> String {
    let loc = match path.strip_prefix(root) {
        Ok(relative) => slash_path(relative),
        Err(_) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    absolute(site_url, &loc)
}

/// Counts of sitemap entries by kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub homepage: usize,
    pub articles: usize,
    pub categories: usize,
    pub pages: usize,
    pub other: usize,
}

impl Summary {
    pub fn of(entries: &[Entry]) -> Summary {
        let count = |p: Priority| entries.iter().filter(|e| e.priority == p).count();
        Summary {
            total: entries.len(),
            homepage: count(HOME),
            articles: count(ARTICLE),
            categories: count(CATEGORY),
            pages: count(PAGE),
            other: count(OTHER),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "   - Total URLs: {}", self.total)?;
        writeln!(f, "   - Homepage: {}", self.homepage)?;
        writeln!(f, "   - Articles: {}", self.articles)?;
        writeln!(f, "   - Categories: {}", self.categories)?;
        writeln!(f, "   - Pages: {}", self.pages)?;
        write!(f, "   - Other: {}", self.other)
    }
}

/// Scans `root` and writes the sitemap for `site_url` to `output`, the
/// plain-text sitemap next to it (see [`txt_path`]), and the sitemap
/// directives in `root`'s `robots.txt`. Returns a summary of the entries.
pub fn generate(root: &Path, site_url: &Url, output: &Path) -> Result<Summary> {
    let entries = scan(root)?;
    log::info!("Found {} pages under '{}'", entries.len(), root.display());
    write(output, &to_xml(site_url, &entries))?;

    let txt = txt_path(output);
    write(&txt, &to_txt(site_url, &entries))?;

    let robots_path = root.join(ROBOTS_FILE);
    let existing = match std::fs::read_to_string(&robots_path) {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(Error::Read {
                path: robots_path,
                err,
            })
        }
    };
    let sitemaps = [
        published_url(root, site_url, output),
        published_url(root, site_url, &txt),
    ];
    write(&robots_path, &update_robots(&existing, &sitemaps))?;
    Ok(Summary::of(&entries))
}

fn write(path: &Path, contents: &str) -> Result<()> {
    File::create(path)
        .and_then(|mut f| f.write_all(contents.as_bytes()))
        .map_err(|err| Error::Write {
            path: path.to_owned(),
            err,
        })
}

/// The result of a fallible sitemap operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem generating the sitemap.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors walking the site directory.
    WalkDir(walkdir::Error),

    /// Returned when an existing file (`robots.txt`) can't be read.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when an output file can't be written.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::WalkDir(err) => err.fmt(f),
            Error::Read { path, err } => {
                write!(f, "Reading '{}': {}", path.display(), err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::WalkDir(err) => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator while walking the site.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

//! Loads the site configuration from `newsgrid.yaml`, found by searching the
//! site directory and then its ancestors, and the optional template
//! overrides from `theme/theme.yaml` beside it.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// The configuration file's name.
pub const CONFIG_FILE_NAME: &str = "newsgrid.yaml";

/// The theme directory, relative to the site directory.
pub const THEME_DIRECTORY: &str = "theme";

const THEME_FILE_NAME: &str = "theme.yaml";

#[derive(Deserialize)]
struct LoadMoreDelay(u64);
impl Default for LoadMoreDelay {
    fn default() -> Self {
        LoadMoreDelay(600)
    }
}

#[derive(Deserialize)]
struct SitemapFile(PathBuf);
impl Default for SitemapFile {
    fn default() -> Self {
        SitemapFile(PathBuf::from("sitemap.xml"))
    }
}

#[derive(Deserialize)]
struct LogLevel(String);
impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(String::from("info"))
    }
}

#[derive(Deserialize)]
struct Project {
    pub site_url: Url,

    #[serde(default)]
    pub load_more_delay_ms: LoadMoreDelay,

    #[serde(default)]
    pub sitemap_file: SitemapFile,

    #[serde(default)]
    pub log_level: LogLevel,
}

/// The resolved site configuration.
#[derive(Debug, PartialEq)]
pub struct Config {
    /// The directory holding the built site (the directory containing the
    /// configuration file).
    pub site_directory: PathBuf,

    /// The public URL of the site root, used for sitemap locations.
    pub site_url: Url,

    /// The pause before each "load more" batch on category pages.
    pub load_more_delay: Duration,

    /// Where the sitemap is written.
    pub sitemap_file: PathBuf,

    /// The default log level, e.g. `info` or `debug`.
    pub log_level: String,

    /// Template overrides for rendered fragments.
    pub theme: Theme,
}

/// Template files that replace the built-in fragment templates. Fragments
/// without an entry keep the built-in template.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub article_card: Option<PathBuf>,
    pub placeholder_card: Option<PathBuf>,
    pub search_result: Option<PathBuf>,
    pub footer: Option<PathBuf>,
}

impl Theme {
    /// Loads `theme/theme.yaml` from `site_directory`. Template paths in the
    /// file are relative to the theme directory. A site without a theme file
    /// gets the default (built-in) theme.
    pub fn from_site_directory(site_directory: &Path) -> Result<Theme> {
        let theme_dir = site_directory.join(THEME_DIRECTORY);
        let path = theme_dir.join(THEME_FILE_NAME);
        if !path.exists() {
            return Ok(Theme::default());
        }
        let file = File::open(&path)
            .with_context(|| format!("Opening theme file `{}`", path.display()))?;
        let theme: Theme = serde_yaml::from_reader(file)
            .with_context(|| format!("Parsing theme file `{}`", path.display()))?;
        let resolve = |relpath: Option<PathBuf>| relpath.map(|relpath| theme_dir.join(relpath));
        Ok(Theme {
            article_card: resolve(theme.article_card),
            placeholder_card: resolve(theme.placeholder_card),
            search_result: resolve(theme.search_result),
            footer: resolve(theme.footer),
        })
    }
}

impl Config {
    /// Finds `newsgrid.yaml` in `dir` or the nearest ancestor directory and
    /// loads it.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Config::from_project_file(&path)
                .with_context(|| format!("Loading configuration from `{}`", path.display()))
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    CONFIG_FILE_NAME
                )),
            }
        }
    }

    /// Loads the configuration file at `path`. Relative paths in the file are
    /// resolved against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)?;
        let site_directory = path
            .parent()
            .ok_or_else(|| {
                anyhow!(
                    "Can't get parent directory for provided project file path '{:?}'",
                    path
                )
            })?
            .to_owned();
        Ok(Config {
            sitemap_file: site_directory.join(project.sitemap_file.0),
            theme: Theme::from_site_directory(&site_directory)?,
            site_directory,
            site_url: project.site_url,
            load_more_delay: Duration::from_millis(project.load_more_delay_ms.0),
            log_level: project.log_level.0,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() -> Result<()> {
        let site = tempfile::tempdir()?;
        fs::write(
            site.path().join(CONFIG_FILE_NAME),
            "site_url: https://omnitrends.github.io\n",
        )?;
        let config = Config::from_directory(site.path())?;
        assert_eq!(
            Config {
                site_directory: site.path().to_owned(),
                site_url: Url::parse("https://omnitrends.github.io")?,
                load_more_delay: Duration::from_millis(600),
                sitemap_file: site.path().join("sitemap.xml"),
                log_level: String::from("info"),
                theme: Theme::default(),
            },
            config,
        );
        Ok(())
    }

    #[test]
    fn test_found_from_subdirectory() -> Result<()> {
        let site = tempfile::tempdir()?;
        fs::write(
            site.path().join(CONFIG_FILE_NAME),
            "site_url: https://example.org/news/\n\
             load_more_delay_ms: 0\n\
             sitemap_file: out/sitemap.xml\n\
             log_level: debug\n",
        )?;
        let nested = site.path().join("category");
        fs::create_dir_all(&nested)?;
        let config = Config::from_directory(&nested)?;
        assert_eq!(site.path(), config.site_directory);
        assert_eq!(Duration::from_millis(0), config.load_more_delay);
        assert_eq!(site.path().join("out/sitemap.xml"), config.sitemap_file);
        assert_eq!("debug", config.log_level);
        Ok(())
    }

    #[test]
    fn test_theme_paths_resolve_against_theme_directory() -> Result<()> {
        let site = tempfile::tempdir()?;
        fs::write(
            site.path().join(CONFIG_FILE_NAME),
            "site_url: https://omnitrends.github.io\n",
        )?;
        let theme_dir = site.path().join(THEME_DIRECTORY);
        fs::create_dir_all(&theme_dir)?;
        fs::write(
            theme_dir.join(THEME_FILE_NAME),
            "article_card: cards/article.html\nfooter: footer.html\n",
        )?;
        let theme = Config::from_directory(site.path())?.theme;
        assert_eq!(
            Theme {
                article_card: Some(theme_dir.join("cards/article.html")),
                placeholder_card: None,
                search_result: None,
                footer: Some(theme_dir.join("footer.html")),
            },
            theme,
        );
        Ok(())
    }

    #[test]
    fn test_invalid_url() -> Result<()> {
        let site = tempfile::tempdir()?;
        fs::write(site.path().join(CONFIG_FILE_NAME), "site_url: not a url\n")?;
        assert!(Config::from_directory(site.path()).is_err());
        Ok(())
    }
}

//! Turns view models into HTML fragments. Each fragment kind has a typed view
//! model ([`ArticleCard`], [`Placeholder`], [`SearchResult`],
//! [`crate::footer::Footer`]) which is converted into a template [`Value`]
//! and executed against one of the [`Renderer`]'s templates.
//!
//! Template values are HTML-escaped during conversion; the templates
//! themselves never escape. Each built-in template can be replaced by a file
//! named in the site's [`Theme`].

use crate::article::Article;
use crate::config::Theme;
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

const ARTICLE_CARD_TEMPLATE: &str = r#"
<article class="article-card">
    <div class="article-card__image">
        <img src="{{.image}}" alt="{{.title}}" loading="lazy">
    </div>
    <div class="article-card__content">
        <div class="article-card__meta">
            <span class="article-card__category">{{.category}}</span>
            <time class="article-card__date" datetime="{{.datetime}}">{{.date}}</time>
        </div>
        <h3 class="article-card__title">
            <a href="{{.href}}">{{.title}}</a>
        </h3>
        <p class="article-card__excerpt">{{.excerpt}}</p>
        <a href="{{.href}}" class="article-card__link">Read More</a>
    </div>
</article>
"#;

const PLACEHOLDER_CARD_TEMPLATE: &str = r##"
<article class="article-card article-card--placeholder" style="opacity: 0.6;">
    <div class="article-card__image">
        <div class="article-card__image-placeholder">
            <span>Articles coming soon</span>
        </div>
    </div>
    <div class="article-card__content">
        <div class="article-card__meta">
            <span class="article-card__category">{{.category}}</span>
            <time class="article-card__date">Coming Soon</time>
        </div>
        <h3 class="article-card__title">
            <a href="#" style="pointer-events: none;" tabindex="-1" aria-disabled="true">{{.title}}</a>
        </h3>
        <p class="article-card__excerpt">{{.excerpt}}</p>
    </div>
</article>
"##;

const SEARCH_RESULT_TEMPLATE: &str = r#"
<div class="search-result">
    <h4><a href="{{.href}}">{{.title}}</a></h4>
    <p>{{.excerpt}}</p>
    <span class="search-category">{{.category}}</span>
</div>
"#;

const FOOTER_TEMPLATE: &str = r#"
<footer class="footer">
    <div class="container">
        <div class="footer__content">
            <div class="footer__section">
                <h3 class="footer__title">{{.site_name}}</h3>
                <p class="footer__description">{{.description}}</p>
            </div>
            <div class="footer__section">
                <h4 class="footer__subtitle">Quick Links</h4>
                <ul class="footer__links">{{range .quick_links}}
                    <li><a href="{{.href}}">{{.name}}</a></li>{{end}}
                </ul>
            </div>
            <div class="footer__section">
                <h4 class="footer__subtitle">Categories</h4>
                <ul class="footer__links">{{range .categories}}
                    <li><a href="{{.href}}">{{.name}}</a></li>{{end}}
                </ul>
            </div>
        </div>
        <div class="footer__bottom">
            <p>&copy; {{.year}} {{.site_name}}. All rights reserved.</p>
        </div>
    </div>
</footer>
"#;

/// The fragment shown in the search panel when nothing matches.
pub const NO_RESULTS: &str = r#"<div class="search-result">No articles found.</div>"#;

/// Holds the parsed fragment templates.
pub struct Renderer {
    article_card: Template,
    placeholder_card: Template,
    search_result: Template,
    footer: Template,
}

impl Renderer {
    /// Parses the built-in templates.
    pub fn new() -> Result<Renderer> {
        Renderer::from_theme(&Theme::default())
    }

    /// Parses the templates `theme` names, using the built-in template for
    /// every fragment it leaves out.
    pub fn from_theme(theme: &Theme) -> Result<Renderer> {
        Ok(Renderer {
            article_card: load_template(
                "article card",
                theme.article_card.as_deref(),
                ARTICLE_CARD_TEMPLATE,
            )?,
            placeholder_card: load_template(
                "placeholder card",
                theme.placeholder_card.as_deref(),
                PLACEHOLDER_CARD_TEMPLATE,
            )?,
            search_result: load_template(
                "search result",
                theme.search_result.as_deref(),
                SEARCH_RESULT_TEMPLATE,
            )?,
            footer: load_template("footer", theme.footer.as_deref(), FOOTER_TEMPLATE)?,
        })
    }

    /// Renders the card for `article`. `base_path` prefixes the image and
    /// link so that they resolve from nested pages.
    pub fn article_card(&self, article: &Article, base_path: &str) -> Result<String> {
        execute(&self.article_card, &ArticleCard::new(article, base_path))
    }

    /// Renders a "coming soon" filler card.
    pub fn placeholder_card(&self, placeholder: &Placeholder) -> Result<String> {
        execute(&self.placeholder_card, placeholder)
    }

    /// Renders a single search panel entry.
    pub fn search_result(&self, article: &Article, base_path: &str) -> Result<String> {
        execute(&self.search_result, &SearchResult::new(article, base_path))
    }

    pub(crate) fn footer(&self, footer: &crate::footer::Footer) -> Result<String> {
        execute(&self.footer, footer)
    }
}

// Parses the template file at `path`, or `builtin` when there is none.
fn load_template(name: &'static str, path: Option<&Path>, builtin: &str) -> Result<Template> {
    match path {
        None => parse_template(name, builtin),
        Some(path) => {
            let source = std::fs::read_to_string(path).map_err(|err| Error::Io {
                path: path.to_owned(),
                err,
            })?;
            parse_template(name, &source)
        }
    }
}

fn parse_template(name: &'static str, source: &str) -> Result<Template> {
    let mut template = Template::default();
    template
        .parse(source)
        .map_err(|err| Error::ParseTemplate { name, err })?;
    Ok(template)
}

fn execute<'a, T>(template: &Template, model: &'a T) -> Result<String>
where
    &'a T: Into<Value>,
{
    let value: Value = model.into();
    let context = Context::from(value).map_err(|err| Error::Template(err.to_string()))?;
    let mut out: Vec<u8> = Vec::new();
    template.execute(&mut out, &context).map_err(Error::Template)?;
    Ok(String::from_utf8(out)?.trim().to_owned())
}

/// Escapes `s` for use in element text or a double-quoted attribute.
pub(crate) fn text(s: &str) -> Value {
    Value::String(html_escape::encode_double_quoted_attribute(s).into_owned())
}

pub(crate) fn object<'a>(fields: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
    let m: HashMap<String, Value> = fields
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();
    Value::Object(m)
}

/// The view model for an article card.
#[derive(Clone, Debug, PartialEq)]
pub struct ArticleCard {
    pub image: String,
    pub href: String,
    pub title: String,
    pub category: String,
    pub datetime: String,
    pub date: String,
    pub excerpt: String,
}

impl ArticleCard {
    pub fn new(article: &Article, base_path: &str) -> ArticleCard {
        ArticleCard {
            image: format!("{}images/{}", base_path, article.image),
            href: format!("{}{}", base_path, article.url),
            title: article.title.clone(),
            category: article.category.clone(),
            datetime: article.iso_date(),
            date: article.date.clone(),
            excerpt: article.excerpt.clone(),
        }
    }
}

impl From<&ArticleCard> for Value {
    /// Converts [`ArticleCard`]s into [`Value`]s for templating.
    fn from(card: &ArticleCard) -> Value {
        object(vec![
            ("image", text(&card.image)),
            ("href", text(&card.href)),
            ("title", text(&card.title)),
            ("category", text(&card.category)),
            ("datetime", text(&card.datetime)),
            ("date", text(&card.date)),
            ("excerpt", text(&card.excerpt)),
        ])
    }
}

/// The view model for a "coming soon" card. Placeholders carry no identifier
/// and link nowhere.
#[derive(Clone, Debug, PartialEq)]
pub struct Placeholder {
    pub category: String,
    pub title: String,
    pub excerpt: String,
}

impl From<&Placeholder> for Value {
    /// Converts [`Placeholder`]s into [`Value`]s for templating.
    fn from(p: &Placeholder) -> Value {
        object(vec![
            ("category", text(&p.category)),
            ("title", text(&p.title)),
            ("excerpt", text(&p.excerpt)),
        ])
    }
}

/// The view model for a search panel entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
}

impl SearchResult {
    pub fn new(article: &Article, base_path: &str) -> SearchResult {
        SearchResult {
            href: format!("{}{}", base_path, article.url),
            title: article.title.clone(),
            excerpt: article.excerpt.clone(),
            category: article.category.clone(),
        }
    }
}

impl From<&SearchResult> for Value {
    /// Converts [`SearchResult`]s into [`Value`]s for templating.
    fn from(r: &SearchResult) -> Value {
        object(vec![
            ("href", text(&r.href)),
            ("title", text(&r.title)),
            ("excerpt", text(&r.excerpt)),
            ("category", text(&r.category)),
        ])
    }
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a problem rendering a fragment.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while reading theme template files.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when a template fails to parse.
    ParseTemplate { name: &'static str, err: String },

    /// Returned when executing a template fails.
    Template(String),

    /// Returned when a template produces invalid UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate { name, err } => {
                write!(f, "Parsing {} template: {}", name, err)
            }
            Error::Template(err) => err.fmt(f),
            Error::Utf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::Template(_) => None,
            Error::Utf8(err) => Some(err),
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    /// Converts a [`std::string::FromUtf8Error`] into an [`Error`]. This
    /// allows us to use the `?` operator on template output.
    fn from(err: std::string::FromUtf8Error) -> Error {
        Error::Utf8(err)
    }
}

//! The article page: keeps the page's visible date and structured metadata in
//! step with the article record, and fills the related-articles panel.

use crate::article::Article;
use crate::page::{page_stem, CardKind, Grid};
use crate::query::{self, RELATED_LIMIT};
use crate::render::{Renderer, Result};
use crate::store::ArticleStore;
use log::debug;
use serde_json::Value;

const LD_JSON_OPEN: &str = r#"<script type="application/ld+json">"#;
const LD_JSON_CLOSE: &str = "</script>";

/// Marks the element holding the visible publication date.
const DATE_ID: &str = r#"id="article-date""#;
const DATE_CLOSE: &str = "</span>";

/// The structured-data fields rewritten with the article's timestamp.
const DATE_FIELDS: [&str; 2] = ["datePublished", "dateModified"];

/// The parts of an article page the controller updates. Any of them may be
/// missing from a given page, in which case it is skipped.
#[derive(Debug, Default)]
pub struct ArticleElements {
    /// The visible publication date text.
    pub date_text: Option<String>,

    /// The page's JSON-LD payload.
    pub structured_data: Option<Value>,

    /// The related-articles panel.
    pub related: Option<Grid>,
}

/// Updates `elements` for the article page at `path`
/// (`.../articles/{id}.html`). Returns the article the page shows, or `None`
/// when the path isn't an article page or no record has that identifier.
pub fn render_article_page<'s>(
    store: &'s ArticleStore,
    renderer: &Renderer,
    path: &str,
    elements: &mut ArticleElements,
) -> Result<Option<&'s Article>> {
    let found = page_stem(path, "articles").and_then(|id| query::find_by_id(store.articles(), id));
    let article = match found {
        Some(article) => article,
        None => {
            debug!("No article record for `{}`", path);
            return Ok(None);
        }
    };

    if let Some(date_text) = &mut elements.date_text {
        *date_text = article.date.clone();
    }
    if let Some(Value::Object(fields)) = &mut elements.structured_data {
        for field in DATE_FIELDS.iter() {
            fields.insert((*field).to_owned(), Value::String(article.timestamp()));
        }
    }
    if let Some(grid) = &mut elements.related {
        grid.clear();
        for related in query::related(store.articles(), article, RELATED_LIMIT) {
            grid.push(CardKind::Article, renderer.article_card(related, "../")?);
        }
    }
    Ok(Some(article))
}

/// Reads the parts of an article page document the controller knows how to
/// update. The related panel is always supplied, since it is rendered from
/// scratch.
pub fn elements_from_document(html: &str) -> ArticleElements {
    ArticleElements {
        date_text: extract_date_text(html),
        structured_data: extract_structured_data(html),
        related: Some(Grid::new()),
    }
}

/// Writes the date text and JSON-LD payload from `elements` back into the
/// article page document.
pub fn patch_document(html: &str, elements: &ArticleElements) -> String {
    let mut html = html.to_owned();
    if let Some(date_text) = &elements.date_text {
        html = replace_date_text(&html, date_text);
    }
    if let Some(data) = &elements.structured_data {
        html = replace_structured_data(&html, data);
    }
    html
}

/// Extracts the visible date from the `id="article-date"` element.
pub fn extract_date_text(html: &str) -> Option<String> {
    let (start, end) = date_text_span(html)?;
    Some(html_escape::decode_html_entities(&html[start..end]).into_owned())
}

/// Replaces the visible date in the `id="article-date"` element. Documents
/// without one are returned unchanged.
pub fn replace_date_text(html: &str, date_text: &str) -> String {
    match date_text_span(html) {
        Some((start, end)) => format!(
            "{}{}{}",
            &html[..start],
            html_escape::encode_text(date_text),
            &html[end..]
        ),
        None => html.to_owned(),
    }
}

fn date_text_span(html: &str) -> Option<(usize, usize)> {
    let id = html.find(DATE_ID)?;
    let start = id + html[id..].find('>')? + 1;
    let len = html[start..].find(DATE_CLOSE)?;
    Some((start, start + len))
}

/// Extracts the JSON-LD payload from an HTML document. Returns `None` when
/// the document has no such block or it doesn't parse.
pub fn extract_structured_data(html: &str) -> Option<Value> {
    let start = html.find(LD_JSON_OPEN)? + LD_JSON_OPEN.len();
    let len = html[start..].find(LD_JSON_CLOSE)?;
    serde_json::from_str(&html[start..start + len]).ok()
}

/// Replaces the JSON-LD payload in an HTML document with `data`. Documents
/// without a JSON-LD block are returned unchanged.
pub fn replace_structured_data(html: &str, data: &Value) -> String {
    let start = match html.find(LD_JSON_OPEN) {
        Some(i) => i + LD_JSON_OPEN.len(),
        None => return html.to_owned(),
    };
    match html[start..].find(LD_JSON_CLOSE) {
        Some(len) => format!("{}\n{}\n{}", &html[..start], data, &html[start + len..]),
        None => html.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::fixture;
    use serde_json::json;

    fn store() -> ArticleStore {
        ArticleStore::with_articles(vec![
            fixture("remote-work", "Business", "01 August 2025", true),
            fixture("biz-old", "Business", "20 July 2025", false),
            fixture("tech", "Technology", "28 July 2025", false),
            fixture("life", "Lifestyle", "25 July 2025", false),
        ])
    }

    #[test]
    fn test_patches_date_and_structured_data() -> Result<()> {
        let store = store();
        let renderer = Renderer::new()?;
        let mut elements = ArticleElements {
            date_text: Some(String::from("Loading...")),
            structured_data: Some(json!({
                "@type": "Article",
                "headline": "Remote Work",
                "datePublished": "2024-01-01"
            })),
            related: Some(Grid::new()),
        };
        let path = "/articles/remote-work.html";
        let article = render_article_page(&store, &renderer, path, &mut elements)?;
        assert_eq!(Some("remote-work"), article.map(|a| a.id.as_str()));
        assert_eq!(Some("01 August 2025"), elements.date_text.as_deref());

        let data = elements.structured_data.unwrap();
        assert_eq!("2025-08-01T00:00:00+00:00", data["datePublished"]);
        assert_eq!("2025-08-01T00:00:00+00:00", data["dateModified"]);
        assert_eq!("Remote Work", data["headline"]);

        let related = elements.related.unwrap();
        assert_eq!(2, related.len());
        assert!(related.cards()[0].html.contains("biz-old"));
        assert!(related.cards()[1].html.contains("tech"));
        assert!(related.cards()[1].html.contains(r#"href="../articles/tech.html""#));
        Ok(())
    }

    #[test]
    fn test_missing_elements_are_skipped() -> Result<()> {
        let store = store();
        let renderer = Renderer::new()?;
        let mut elements = ArticleElements::default();
        let article = render_article_page(&store, &renderer, "articles/tech.html", &mut elements)?;
        assert!(article.is_some());
        assert!(elements.date_text.is_none());
        assert!(elements.related.is_none());
        Ok(())
    }

    #[test]
    fn test_unknown_article_changes_nothing() -> Result<()> {
        let store = store();
        let renderer = Renderer::new()?;
        let mut elements = ArticleElements {
            date_text: Some(String::from("unchanged")),
            ..ArticleElements::default()
        };
        for path in &["/articles/missing.html", "/category/tech.html"] {
            assert!(render_article_page(&store, &renderer, path, &mut elements)?.is_none());
        }
        assert_eq!(Some("unchanged"), elements.date_text.as_deref());
        Ok(())
    }

    #[test]
    fn test_structured_data_round_trip_through_document() {
        let html =
            r#"<head><script type="application/ld+json">{"datePublished": "x"}</script></head>"#;
        let mut data = extract_structured_data(html).unwrap();
        data["datePublished"] = json!("2025-08-01T00:00:00+00:00");
        let patched = replace_structured_data(html, &data);
        assert_eq!(Some(data), extract_structured_data(&patched));
        assert!(patched.ends_with("</script></head>"));
        assert_eq!(None, extract_structured_data("<p>no metadata</p>"));
    }

    #[test]
    fn test_patch_document() -> Result<()> {
        let html = concat!(
            r#"<head><script type="application/ld+json">"#,
            r#"{"headline": "Tech", "datePublished": "2024-01-01"}</script></head>"#,
            r#"<body><span class="article-date" id="article-date">Loading &amp; more</span>"#,
            "</body>",
        );
        let store = store();
        let renderer = Renderer::new()?;
        let mut elements = elements_from_document(html);
        assert_eq!(Some("Loading & more"), elements.date_text.as_deref());

        render_article_page(&store, &renderer, "/articles/tech.html", &mut elements)?;
        let patched = patch_document(html, &elements);
        assert!(patched.contains(r#"id="article-date">28 July 2025</span>"#));
        let data = extract_structured_data(&patched).unwrap();
        assert_eq!("2025-07-28T00:00:00+00:00", data["datePublished"]);
        assert_eq!("Tech", data["headline"]);
        assert!(patched.ends_with("</span></body>"));
        Ok(())
    }

    #[test]
    fn test_document_without_date_element() {
        let html = "<p>no date here</p>";
        assert_eq!(None, extract_date_text(html));
        assert_eq!(html, replace_date_text(html, "01 August 2025"));
    }
}

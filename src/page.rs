//! Page elements and page-location helpers. Controllers never look elements
//! up on their own; the caller hands them a [`Grid`] (or whatever else they
//! need) and gets it back with the rendered fragments spliced in.

use std::path::Path;

/// How deep a page sits below the site root. Links, images and the article
/// data file are resolved relative to the page, so nested pages need a
/// parent-relative prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    /// A page in the site root, e.g. `/index.html`.
    Root,

    /// A page one directory down, e.g. `/category/technology.html` or
    /// `/articles/remote-work-trends.html`.
    Nested,
}

impl Depth {
    /// Determines the depth of the page at `path`. Any path with more than
    /// one segment is considered nested.
    pub fn of(path: &str) -> Depth {
        match segments(path).count() {
            0 | 1 => Depth::Root,
            _ => Depth::Nested,
        }
    }

    /// The prefix that maps site-root-relative links to page-relative ones.
    pub fn base_path(self) -> &'static str {
        match self {
            Depth::Root => "",
            Depth::Nested => "../",
        }
    }
}

fn segments(path: &str) -> impl DoubleEndedIterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Strips the leading `/` from a page path so that it can be joined onto the
/// site root.
pub fn site_relative(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Reads the page at `page_path` (absolute within the site, e.g.
/// `/articles/x.html`, or relative to it) from `site_root`.
pub fn read_page(site_root: &Path, page_path: &str) -> std::io::Result<String> {
    std::fs::read_to_string(site_root.join(site_relative(page_path)))
}

/// Extracts `{stem}` from a path ending in `{dir}/{stem}.html`. The stem runs
/// up to the first `.` and must be non-empty.
pub fn page_stem<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let mut rev = segments(path).rev();
    let file_name = rev.next()?;
    if rev.next()? != dir {
        return None;
    }
    let stem = file_name.strip_suffix(".html")?;
    match stem.split('.').next() {
        Some(s) if !s.is_empty() && s.len() == stem.len() => Some(s),
        _ => None,
    }
}

/// Distinguishes real article cards from "coming soon" filler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Article,
    Placeholder,
}

/// A rendered card.
#[derive(Clone, Debug)]
pub struct Card {
    pub kind: CardKind,
    pub html: String,
}

/// The article grid container. Holds rendered cards in display order.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cards: Vec<Card>,
}

impl Grid {
    pub fn new() -> Grid {
        Grid::default()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn push(&mut self, kind: CardKind, html: String) {
        self.cards.push(Card { kind, html });
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Counts the cards of the given kind.
    pub fn count(&self, kind: CardKind) -> usize {
        self.cards.iter().filter(|c| c.kind == kind).count()
    }

    /// The grid's inner HTML.
    pub fn to_html(&self) -> String {
        self.cards.iter().map(|c| c.html.as_str()).collect()
    }
}

/// The "load more" button under a paginated grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadMore {
    enabled: bool,
}

impl LoadMore {
    pub fn enabled() -> LoadMore {
        LoadMore { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="load-more-container"><button class="btn btn--primary load-more-btn"{}>{}</button></div>"#,
            if self.enabled { "" } else { " disabled" },
            if self.enabled { "Load More Articles" } else { "Loading..." },
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_depth() {
        assert_eq!(Depth::Root, Depth::of("/"));
        assert_eq!(Depth::Root, Depth::of("/index.html"));
        assert_eq!(Depth::Root, Depth::of("about.html"));
        assert_eq!(Depth::Nested, Depth::of("/category/technology.html"));
        assert_eq!(Depth::Nested, Depth::of("articles/ai-revolution-2024.html"));
        assert_eq!("../", Depth::Nested.base_path());
        assert_eq!("", Depth::Root.base_path());
    }

    #[test]
    fn test_page_stem() {
        assert_eq!(Some("tech"), page_stem("/category/tech.html", "category"));
        assert_eq!(Some("x"), page_stem("site/articles/x.html", "articles"));
        assert_eq!(None, page_stem("/category/tech.htm", "category"));
        assert_eq!(None, page_stem("/category/.html", "category"));
        assert_eq!(None, page_stem("/category/a.b.html", "category"));
        assert_eq!(None, page_stem("/pages/tech.html", "category"));
        assert_eq!(None, page_stem("tech.html", "category"));
    }

    #[test]
    fn test_read_page_ignores_leading_slash() -> std::io::Result<()> {
        let site = tempfile::tempdir()?;
        std::fs::create_dir_all(site.path().join("articles"))?;
        std::fs::write(site.path().join("articles/a.html"), "<p>a</p>")?;
        assert_eq!("<p>a</p>", read_page(site.path(), "/articles/a.html")?);
        assert_eq!("<p>a</p>", read_page(site.path(), "articles/a.html")?);
        assert_eq!("articles/a.html", site_relative("//articles/a.html"));
        Ok(())
    }

    #[test]
    fn test_grid_counts() {
        let mut grid = Grid::new();
        grid.push(CardKind::Article, "<a>".to_owned());
        grid.push(CardKind::Placeholder, "<p>".to_owned());
        grid.push(CardKind::Placeholder, "<p>".to_owned());
        assert_eq!(1, grid.count(CardKind::Article));
        assert_eq!(2, grid.count(CardKind::Placeholder));
        assert_eq!("<a><p><p>", grid.to_html());
        grid.clear();
        assert!(grid.is_empty());
    }
}

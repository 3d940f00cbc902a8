//! The search overlay: a text input wired to a result panel, filtering the
//! in-memory article list on every keystroke.

use crate::article::Article;
use crate::query;
use crate::render::{Renderer, Result, NO_RESULTS};

/// Queries shorter than this (after trimming) clear the panel.
pub const MIN_QUERY_LEN: usize = 2;

/// The search result panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultPanel {
    pub visible: bool,
    pub html: String,
}

/// Where a click landed, relative to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    Input,
    Panel,
    Elsewhere,
}

/// Wires a search input to a [`ResultPanel`].
pub struct SearchOverlay<'s> {
    articles: &'s [Article],
    renderer: &'s Renderer,
    base_path: &'s str,
    panel: ResultPanel,
    matches: usize,
}

impl<'s> SearchOverlay<'s> {
    /// Creates an overlay over `articles`. Result links are prefixed with
    /// `base_path`. Returns `None` when the page has no result panel.
    pub fn new(
        articles: &'s [Article],
        renderer: &'s Renderer,
        base_path: &'s str,
        panel: Option<ResultPanel>,
    ) -> Option<SearchOverlay<'s>> {
        Some(SearchOverlay {
            articles,
            renderer,
            base_path,
            panel: panel?,
            matches: 0,
        })
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    /// The number of articles matched by the last query.
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// Handles a change to the input's value.
    pub fn on_input(&mut self, value: &str) -> Result<()> {
        let query = value.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            self.matches = 0;
            self.panel.html.clear();
            self.panel.visible = false;
            return Ok(());
        }

        let found = query::search(self.articles, &query);
        self.matches = found.len();
        let html = if found.is_empty() {
            NO_RESULTS.to_owned()
        } else {
            found
                .iter()
                .map(|a| self.renderer.search_result(a, self.base_path))
                .collect::<Result<Vec<String>>>()?
                .concat()
        };
        self.panel.html = html;
        self.panel.visible = true;
        Ok(())
    }

    /// Handles a click anywhere on the page. Clicks outside both the input
    /// and the panel hide the panel.
    pub fn on_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Elsewhere {
            self.panel.visible = false;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::fixture;

    fn articles() -> Vec<Article> {
        let mut articles = vec![
            fixture("ai", "Technology", "01 August 2025", true),
            fixture("green", "Lifestyle", "01 August 2025", true),
            fixture("remote", "Business", "01 August 2025", true),
        ];
        articles[0].title = String::from("The AI Revolution");
        articles[1].excerpt = String::from("Practical tips for sustainable living.");
        articles
    }

    #[test]
    fn test_short_query_hides_panel() -> Result<()> {
        let articles = articles();
        let renderer = Renderer::new()?;
        let mut overlay =
            SearchOverlay::new(&articles, &renderer, "", Some(ResultPanel::default())).unwrap();
        overlay.on_input("ai")?;
        assert!(overlay.panel().visible);
        overlay.on_input(" a ")?;
        assert_eq!(&ResultPanel::default(), overlay.panel());
        Ok(())
    }

    #[test]
    fn test_matches_title_excerpt_category() -> Result<()> {
        let articles = articles();
        let renderer = Renderer::new()?;
        let mut overlay =
            SearchOverlay::new(&articles, &renderer, "", Some(ResultPanel::default())).unwrap();
        overlay.on_input("  AI ")?;
        assert_eq!(2, overlay.matches());
        assert!(overlay.panel().html.contains("The AI Revolution"));
        assert!(overlay.panel().html.contains("Title of green"));

        overlay.on_input("business")?;
        assert_eq!(1, overlay.matches());
        assert!(overlay.panel().html.contains(r#"href="articles/remote.html""#));
        Ok(())
    }

    #[test]
    fn test_no_results_message() -> Result<()> {
        let articles = articles();
        let renderer = Renderer::new()?;
        let mut overlay =
            SearchOverlay::new(&articles, &renderer, "../", Some(ResultPanel::default())).unwrap();
        overlay.on_input("zebra")?;
        assert!(overlay.panel().visible);
        assert_eq!(NO_RESULTS, overlay.panel().html);
        Ok(())
    }

    #[test]
    fn test_only_outside_clicks_dismiss() -> Result<()> {
        let articles = articles();
        let renderer = Renderer::new()?;
        let mut overlay =
            SearchOverlay::new(&articles, &renderer, "", Some(ResultPanel::default())).unwrap();
        overlay.on_input("revolution")?;
        overlay.on_click(ClickTarget::Input);
        overlay.on_click(ClickTarget::Panel);
        assert!(overlay.panel().visible);
        overlay.on_click(ClickTarget::Elsewhere);
        assert!(!overlay.panel().visible);
        Ok(())
    }

    #[test]
    fn test_missing_panel() -> Result<()> {
        let renderer = Renderer::new()?;
        assert!(SearchOverlay::new(&[], &renderer, "", None).is_none());
        Ok(())
    }
}

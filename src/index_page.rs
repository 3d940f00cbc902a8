//! The home page's featured grid. The grid always shows exactly
//! [`INDEX_SLOTS`] cards: featured articles first, then "coming soon"
//! placeholders for whatever is left.

use crate::page::{CardKind, Grid};
use crate::query;
use crate::render::{Placeholder, Renderer, Result};
use crate::store::ArticleStore;
use log::debug;

/// The number of cards in the home page grid (a 3x3 layout).
pub const INDEX_SLOTS: usize = 9;

const PLACEHOLDER_CATEGORY: &str = "Coming Soon";

const PLACEHOLDER_TEXT: [(&str, &str); INDEX_SLOTS] = [
    (
        "Exciting Content Coming Soon",
        "Stay tuned for more insightful articles covering the latest trends across technology, lifestyle, and innovation.",
    ),
    (
        "More Trending Articles",
        "Discover upcoming content that will keep you informed about the latest developments in various industries.",
    ),
    (
        "Latest Insights & Trends",
        "Get ready for fresh perspectives and expert analysis on topics that matter most to you.",
    ),
    (
        "Discover New Perspectives",
        "More engaging content is on the way to help you stay ahead of the curve.",
    ),
    (
        "Stay Tuned for Updates",
        "We're working on exciting new articles that will provide valuable insights and trends.",
    ),
    (
        "Fresh Content on the Way",
        "Coming soon: comprehensive guides and analysis on trending topics.",
    ),
    (
        "New Articles in Development",
        "New content is being developed to bring you the latest industry insights.",
    ),
    (
        "Coming Soon: Expert Analysis",
        "Stay connected for upcoming articles featuring expert opinions and trend analysis.",
    ),
    (
        "More Stories to Explore",
        "More stories and insights are coming to help you discover the latest trends.",
    ),
];

/// Replaces the contents of `grid` with the home page cards. Links are
/// rendered root-relative since the home page sits in the site root.
pub fn render_index(store: &ArticleStore, renderer: &Renderer, grid: &mut Grid) -> Result<()> {
    let featured = query::featured(store.articles(), INDEX_SLOTS);
    debug!(
        "Rendering index with {} featured articles and {} placeholders",
        featured.len(),
        INDEX_SLOTS - featured.len()
    );

    grid.clear();
    for article in &featured {
        grid.push(CardKind::Article, renderer.article_card(article, "")?);
    }
    for (title, excerpt) in PLACEHOLDER_TEXT.iter().take(INDEX_SLOTS - featured.len()) {
        let placeholder = Placeholder {
            category: PLACEHOLDER_CATEGORY.to_owned(),
            title: (*title).to_owned(),
            excerpt: (*excerpt).to_owned(),
        };
        grid.push(CardKind::Placeholder, renderer.placeholder_card(&placeholder)?);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::{fixture, Article};

    fn store(featured: usize, other: usize) -> ArticleStore {
        let mut articles: Vec<Article> = (0..featured)
            .map(|i| fixture(&format!("f{}", i), "News", "01 August 2025", true))
            .collect();
        articles.extend(
            (0..other).map(|i| fixture(&format!("o{}", i), "News", "02 August 2025", false)),
        );
        ArticleStore::with_articles(articles)
    }

    #[test]
    fn test_pads_to_nine() -> Result<()> {
        let renderer = Renderer::new()?;
        let mut grid = Grid::new();
        render_index(&store(4, 3), &renderer, &mut grid)?;
        assert_eq!(INDEX_SLOTS, grid.len());
        assert_eq!(4, grid.count(CardKind::Article));
        assert_eq!(5, grid.count(CardKind::Placeholder));
        assert!(grid.cards()[4].html.contains("Exciting Content Coming Soon"));
        Ok(())
    }

    #[test]
    fn test_caps_at_nine() -> Result<()> {
        let renderer = Renderer::new()?;
        let mut grid = Grid::new();
        grid.push(CardKind::Article, String::from("stale"));
        render_index(&store(12, 0), &renderer, &mut grid)?;
        assert_eq!(INDEX_SLOTS, grid.count(CardKind::Article));
        assert_eq!(0, grid.count(CardKind::Placeholder));
        assert!(grid.cards().iter().all(|c| c.html != "stale"));
        Ok(())
    }

    #[test]
    fn test_empty_store_is_all_placeholders() -> Result<()> {
        let renderer = Renderer::new()?;
        let mut grid = Grid::new();
        render_index(&ArticleStore::new(), &renderer, &mut grid)?;
        assert_eq!(INDEX_SLOTS, grid.count(CardKind::Placeholder));
        Ok(())
    }
}

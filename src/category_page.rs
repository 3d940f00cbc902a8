//! The category page: a paginated grid of the category's articles, newest
//! first, revealed in batches behind a "load more" control.
//!
//! The page moves through [`State::Loaded`], [`State::PartiallyShown`] and
//! [`State::FullyShown`]. The first batch is sized by fixed thresholds (with
//! placeholders when the category has fewer than three articles); later
//! batches reveal up to [`BATCH_SIZE`] more articles each and never add
//! placeholders.

use crate::article::Article;
use crate::category::Category;
use crate::page::{CardKind, Grid, LoadMore};
use crate::query;
use crate::render::{Placeholder, Renderer, Result};
use crate::store::ArticleStore;
use log::{debug, info};
use std::time::Duration;

/// The most articles revealed per batch.
pub const BATCH_SIZE: usize = 9;

/// Below this many articles the first batch is padded with placeholders.
const MIN_GRID: usize = 3;

/// Links on category pages are resolved from `category/`.
const BASE_PATH: &str = "../";

/// Where the page is in its reveal sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing revealed yet.
    Loaded,

    /// Some but not all of the category's articles are shown.
    PartiallyShown,

    /// Every article is shown.
    FullyShown,
}

/// Counts how many of the category's articles have been revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub total: usize,
    pub shown: usize,
}

impl Cursor {
    pub fn remaining(&self) -> usize {
        self.total - self.shown
    }

    /// The state implied by the cursor.
    pub fn state(&self) -> State {
        if self.shown >= self.total {
            State::FullyShown
        } else if self.shown == 0 {
            State::Loaded
        } else {
            State::PartiallyShown
        }
    }

    /// Whether a "load more" control belongs under the grid. The control
    /// only appears after a full first batch and while articles remain.
    pub fn wants_load_more(&self) -> bool {
        self.shown >= BATCH_SIZE && self.shown < self.total
    }
}

/// Controller for one category page view.
pub struct CategoryPage<'s> {
    category: &'static Category,
    articles: Vec<&'s Article>,
    renderer: &'s Renderer,
    cursor: Cursor,
    grid: Grid,
    load_more: Option<LoadMore>,
    delay: Duration,
}

impl<'s> CategoryPage<'s> {
    /// Opens the category page at `path` (`.../category/{slug}.html`) and
    /// renders its first batch into `grid`. Returns `Ok(None)` without
    /// touching anything when the path doesn't name a configured category
    /// or the page has no grid.
    ///
    /// `delay` is the pause taken before each "load more" batch is revealed.
    pub fn open(
        store: &'s ArticleStore,
        renderer: &'s Renderer,
        path: &str,
        grid: Option<Grid>,
        delay: Duration,
    ) -> Result<Option<CategoryPage<'s>>> {
        let category = match Category::from_page_path(path) {
            Some(category) => category,
            None => {
                debug!("`{}` is not a known category page", path);
                return Ok(None);
            }
        };
        let mut grid = match grid {
            Some(grid) => grid,
            None => return Ok(None),
        };
        grid.clear();

        let mut articles = query::by_category(store.articles(), category.name);
        query::sort_newest_first(&mut articles);
        info!(
            "Opening category `{}` with {} articles",
            category.name,
            articles.len()
        );

        let mut page = CategoryPage {
            category,
            cursor: Cursor {
                total: articles.len(),
                shown: 0,
            },
            articles,
            renderer,
            grid,
            load_more: None,
            delay,
        };
        page.reveal_first()?;
        Ok(Some(page))
    }

    pub fn category(&self) -> &'static Category {
        self.category
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> State {
        self.cursor.state()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn load_more_control(&self) -> Option<&LoadMore> {
        self.load_more.as_ref()
    }

    /// Hands the grid back, ending the page view.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// The grid followed by the load-more control, if any.
    pub fn to_html(&self) -> String {
        let mut html = self.grid.to_html();
        if let Some(control) = &self.load_more {
            html.push_str(&control.to_html());
        }
        html
    }

    fn reveal_first(&mut self) -> Result<()> {
        let total = self.cursor.total;
        if total >= MIN_GRID {
            self.reveal(BATCH_SIZE)?;
        } else {
            self.reveal(total)?;
            for placeholder in self.placeholders().into_iter().skip(total) {
                let html = self.renderer.placeholder_card(&placeholder)?;
                self.grid.push(CardKind::Placeholder, html);
            }
        }
        self.update_control();
        Ok(())
    }

    /// Handles a click on the "load more" control. Does nothing unless the
    /// control is present and enabled. Otherwise the control is disabled,
    /// `pause` is called with the configured delay and the disabled control,
    /// the next batch is revealed, and the control is re-enabled or removed.
    /// Returns the number of articles revealed.
    pub fn load_more<F: FnOnce(Duration, &LoadMore)>(&mut self, pause: F) -> Result<usize> {
        let control = match &mut self.load_more {
            Some(control) if control.is_enabled() => control,
            _ => return Ok(0),
        };
        control.disable();
        pause(self.delay, control);
        let revealed = self.reveal(BATCH_SIZE)?;
        debug!(
            "Revealed {} more `{}` articles ({} of {})",
            revealed, self.category.name, self.cursor.shown, self.cursor.total
        );
        self.update_control();
        Ok(revealed)
    }

    fn reveal(&mut self, limit: usize) -> Result<usize> {
        let end = self.cursor.shown + limit.min(self.cursor.remaining());
        for article in &self.articles[self.cursor.shown..end] {
            let html = self.renderer.article_card(article, BASE_PATH)?;
            self.grid.push(CardKind::Article, html);
        }
        let revealed = end - self.cursor.shown;
        self.cursor.shown = end;
        Ok(revealed)
    }

    fn update_control(&mut self) {
        if self.cursor.wants_load_more() {
            self.load_more.get_or_insert_with(LoadMore::enabled).enable();
        } else {
            self.load_more = None;
        }
    }

    /// The filler cards, in order. A category with `n` articles shows the
    /// last `MIN_GRID - n` of these.
    fn placeholders(&self) -> Vec<Placeholder> {
        let name = self.category.name;
        let lower = name.to_lowercase();
        vec![
            Placeholder {
                category: name.to_owned(),
                title: format!("{} Articles Coming Soon", name),
                excerpt: format!(
                    "Stay tuned for exciting content about {} trends and insights.",
                    lower
                ),
            },
            Placeholder {
                category: name.to_owned(),
                title: format!("More {} Content", name),
                excerpt: format!(
                    "Discover the latest in {} and stay ahead of the curve.",
                    lower
                ),
            },
            Placeholder {
                category: name.to_owned(),
                title: format!("{} Insights on the Way", name),
                excerpt: format!(
                    "New {} stories are being written. Check back soon.",
                    lower
                ),
            },
        ]
    }
}

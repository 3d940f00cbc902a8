//! The library code for `newsgrid`, the article pipeline behind a static news
//! site. The architecture can be broken down into three layers:
//!
//! 1. Loading the article list ([`crate::store`]) and querying it
//!    ([`crate::query`])
//! 2. Rendering articles and placeholders into HTML fragments
//!    ([`crate::render`])
//! 3. Page controllers that splice fragments into page elements
//!    ([`crate::index_page`], [`crate::category_page`],
//!    [`crate::article_page`], [`crate::search`], [`crate::footer`])
//!
//! Of these, the category page is the most involved: it reveals a
//! category's articles in batches behind a "load more" control, padding
//! sparse categories with "coming soon" placeholders.
//!
//! Separately, [`crate::sitemap`] generates `sitemap.xml` for the built site.
//!
//! Page elements are passed to controllers explicitly and all state lives in
//! the controller for one page view; nothing is global.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod article;
pub mod article_page;
pub mod category;
pub mod category_page;
pub mod config;
pub mod footer;
pub mod index_page;
pub mod page;
pub mod query;
pub mod render;
pub mod search;
pub mod sitemap;
pub mod store;

//! The site-wide footer. Every page carries the same footer, with its links
//! prefixed according to the page's depth.

use crate::category::CATEGORIES;
use crate::render::{object, text, Renderer, Result};
use chrono::Datelike;
use gtmpl::Value;

const SITE_NAME: &str = "OmniTrends";
const DESCRIPTION: &str =
    "Your source for the latest trends, insights, and discoveries across technology, lifestyle, and innovation.";

const QUICK_LINKS: [(&str, &str); 6] = [
    ("Home", "index.html"),
    ("About", "pages/about.html"),
    ("Contact", "pages/contact.html"),
    ("Privacy Policy", "pages/privacy.html"),
    ("Terms & Conditions", "pages/terms.html"),
    ("Disclaimer", "pages/disclaimer.html"),
];

/// A footer link.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub name: String,
    pub href: String,
}

/// The view model for the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    pub quick_links: Vec<Link>,
    pub categories: Vec<Link>,
    pub year: i32,
}

impl Footer {
    /// Builds the footer for a page whose base path is `base_path`.
    pub fn new(base_path: &str, year: i32) -> Footer {
        Footer {
            quick_links: QUICK_LINKS
                .iter()
                .map(|(name, path)| Link {
                    name: (*name).to_owned(),
                    href: format!("{}{}", base_path, path),
                })
                .collect(),
            categories: CATEGORIES
                .iter()
                .map(|c| Link {
                    name: c.name.to_owned(),
                    href: c.href(base_path),
                })
                .collect(),
            year,
        }
    }
}

impl From<&Link> for Value {
    fn from(link: &Link) -> Value {
        object(vec![("name", text(&link.name)), ("href", text(&link.href))])
    }
}

impl From<&Footer> for Value {
    /// Converts a [`Footer`] into a [`Value`] for templating.
    fn from(footer: &Footer) -> Value {
        let links = |links: &[Link]| Value::Array(links.iter().map(Value::from).collect());
        object(vec![
            ("site_name", text(SITE_NAME)),
            ("description", text(DESCRIPTION)),
            ("quick_links", links(&footer.quick_links)),
            ("categories", links(&footer.categories)),
            ("year", text(&footer.year.to_string())),
        ])
    }
}

/// Renders the footer for a page whose base path is `base_path`, stamped
/// with the current year.
pub fn render_footer(renderer: &Renderer, base_path: &str) -> Result<String> {
    renderer.footer(&Footer::new(base_path, chrono::Local::now().year()))
}

//! Defines the [`Article`] record, the unit of content shared by every page
//! controller, along with the parsing of its display date.

use chrono::NaiveDate;
use serde::Deserialize;

/// The `strftime` pattern for display dates, e.g. `01 August 2025`.
const DISPLAY_DATE_FORMAT: &str = "%d %B %Y";

/// A single article's metadata as stored in `json/articles.json`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Article {
    /// The article's identifier. This is expected to be unique, but the data
    /// file isn't trusted to keep it so (see [`crate::store`]).
    pub id: String,

    /// The headline.
    pub title: String,

    /// The display name of the article's category, e.g. `Technology`.
    pub category: String,

    /// The publication date in its display format, `DD Month YYYY`.
    pub date: String,

    /// A short plain-text teaser.
    pub excerpt: String,

    /// The image file name, relative to the site's `images/` directory.
    pub image: String,

    /// The destination link, relative to the site root.
    pub url: String,

    /// Whether the article belongs to the home page highlight set.
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// Returns the parsed publication date. Dates that can't be parsed sort
    /// as the epoch so that a single bad record never aborts a listing.
    pub fn published(&self) -> NaiveDate {
        parse_display_date(&self.date).unwrap_or_else(epoch)
    }

    /// Returns the publication date as `YYYY-MM-DD`, suitable for a
    /// `datetime` attribute.
    pub fn iso_date(&self) -> String {
        self.published().format("%Y-%m-%d").to_string()
    }

    /// Returns the publication timestamp (midnight UTC) in RFC 3339 form, as
    /// used by structured-data payloads.
    pub fn timestamp(&self) -> String {
        self.published()
            .format("%Y-%m-%dT00:00:00+00:00")
            .to_string()
    }
}

/// Parses a `DD Month YYYY` date (full English month name). Surrounding
/// whitespace is ignored.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DISPLAY_DATE_FORMAT).ok()
}

/// 1970-01-01, the date substituted for unparseable display dates.
pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("1970-01-01 is a valid date")
}

#[cfg(test)]
pub(crate) fn fixture(id: &str, category: &str, date: &str, featured: bool) -> Article {
    Article {
        id: id.to_owned(),
        title: format!("Title of {}", id),
        category: category.to_owned(),
        date: date.to_owned(),
        excerpt: format!("Excerpt of {}", id),
        image: format!("{}.jpg", id),
        url: format!("articles/{}.html", id),
        featured,
    }
}

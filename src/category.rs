//! Defines the [`Category`] type and the fixed category configuration that
//! category pages and footer navigation resolve against.

/// A configured category. Category pages live at `category/{slug}.html`;
/// articles refer to a category by its display `name`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Category {
    /// The URL slug, e.g. `technology`.
    pub slug: &'static str,

    /// The display name, e.g. `Technology`.
    pub name: &'static str,
}

/// Every category the site knows about, in navigation order.
pub const CATEGORIES: [Category; 12] = [
    Category::new("technology", "Technology"),
    Category::new("lifestyle", "Lifestyle"),
    Category::new("business", "Business"),
    Category::new("innovation", "Innovation"),
    Category::new("news", "News"),
    Category::new("health", "Health"),
    Category::new("entertainment", "Entertainment"),
    Category::new("finance", "Finance"),
    Category::new("science", "Science"),
    Category::new("travel", "Travel"),
    Category::new("food", "Food"),
    Category::new("sports", "Sports"),
];

impl Category {
    const fn new(slug: &'static str, name: &'static str) -> Category {
        Category { slug, name }
    }

    /// Looks up a category by its slug. Slugs are matched exactly.
    pub fn from_slug(slug: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.slug == slug)
    }

    /// Looks up a category by display name, ignoring case.
    pub fn from_name(name: &str) -> Option<&'static Category> {
        CATEGORIES
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Resolves the category for a page located at `.../category/{slug}.html`.
    /// Returns `None` for other paths and for unknown slugs.
    pub fn from_page_path(path: &str) -> Option<&'static Category> {
        crate::page::page_stem(path, "category").and_then(Category::from_slug)
    }

    /// The link to the category's page from a page whose base path is
    /// `base_path` (see [`crate::page::Depth::base_path`]).
    pub fn href(&self, base_path: &str) -> String {
        format!("{}category/{}.html", base_path, self.slug)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_page_path() {
        assert_eq!(
            Some("Technology"),
            Category::from_page_path("/category/technology.html").map(|c| c.name),
        );
        assert_eq!(
            Some("Sports"),
            Category::from_page_path("category/sports.html").map(|c| c.name),
        );
        assert_eq!(None, Category::from_page_path("/category/astrology.html"));
        assert_eq!(None, Category::from_page_path("/articles/technology.html"));
        assert_eq!(None, Category::from_page_path("/index.html"));
    }

    #[test]
    fn test_from_name_ignores_case() {
        assert_eq!(Some("finance"), Category::from_name("FINANCE").map(|c| c.slug));
        assert_eq!(None, Category::from_name("Gardening"));
    }

    #[test]
    fn test_slugs_are_unique() {
        use std::collections::HashSet;
        let slugs: HashSet<&str> = CATEGORIES.iter().map(|c| c.slug).collect();
        assert_eq!(CATEGORIES.len(), slugs.len());
    }

    #[test]
    fn test_href() {
        let food = Category::from_slug("food").unwrap();
        assert_eq!("../category/food.html", food.href("../"));
        assert_eq!("category/food.html", food.href(""));
    }
}

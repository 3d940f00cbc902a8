//! Pure queries over a borrowed article list. None of these allocate new
//! articles; they return references into the store's list.
//!
//! Every date-ordered result uses [`sort_newest_first`]: newest publication
//! date first, ties broken by identifier so that listings are deterministic.

use crate::article::Article;
use std::cmp::Ordering;

/// The number of related articles shown on an article page.
pub const RELATED_LIMIT: usize = 2;

/// Returns every article whose category equals `name`, ignoring case, in
/// list order.
pub fn by_category<'a>(articles: &'a [Article], name: &str) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| a.category.to_lowercase() == name.to_lowercase())
        .collect()
}

/// Returns the `limit` most recent articles.
pub fn latest(articles: &[Article], limit: usize) -> Vec<&Article> {
    newest(articles.iter().collect(), limit)
}

/// Returns the `limit` most recent featured articles.
pub fn featured(articles: &[Article], limit: usize) -> Vec<&Article> {
    newest(articles.iter().filter(|a| a.featured).collect(), limit)
}

/// Selects up to `limit` articles to show alongside `current`: the newest
/// articles in the same category first, then the newest of everything else.
/// Records sharing `current`'s identifier are never included and nothing is
/// selected twice.
pub fn related<'a>(articles: &'a [Article], current: &Article, limit: usize) -> Vec<&'a Article> {
    let is_current = |a: &Article| a.id == current.id;
    let same_category = |a: &Article| a.category.eq_ignore_ascii_case(&current.category);

    let mut selected = newest(
        articles
            .iter()
            .filter(|&a| !is_current(a) && same_category(a))
            .collect(),
        limit,
    );
    if selected.len() < limit {
        let backfill = newest(
            articles
                .iter()
                .filter(|&a| !is_current(a) && !same_category(a))
                .collect(),
            limit - selected.len(),
        );
        selected.extend(backfill);
    }
    selected
}

/// Finds an article by identifier. When identifiers are duplicated the first
/// record wins.
pub fn find_by_id<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}

/// Returns every article whose title, excerpt or category contains `query`,
/// ignoring case, in list order.
pub fn search<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let query = query.to_lowercase();
    articles
        .iter()
        .filter(|a| {
            a.title.to_lowercase().contains(&query)
                || a.excerpt.to_lowercase().contains(&query)
                || a.category.to_lowercase().contains(&query)
        })
        .collect()
}

/// Sorts articles newest first, breaking date ties by identifier.
pub fn sort_newest_first(articles: &mut Vec<&Article>) {
    articles.sort_by(|a, b| newest_first(a, b));
}

fn newest_first(a: &Article, b: &Article) -> Ordering {
    b.published()
        .cmp(&a.published())
        .then_with(|| a.id.cmp(&b.id))
}

fn newest(mut articles: Vec<&Article>, limit: usize) -> Vec<&Article> {
    sort_newest_first(&mut articles);
    articles.truncate(limit);
    articles
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::article::fixture;

    fn articles() -> Vec<Article> {
        vec![
            fixture("tech-a", "Technology", "01 August 2025", true),
            fixture("life-a", "Lifestyle", "01 August 2025", true),
            fixture("biz-a", "Business", "01 August 2025", true),
            fixture("tech-b", "Technology", "28 July 2025", false),
            fixture("tech-c", "technology", "25 July 2025", false),
            fixture("biz-b", "Business", "20 July 2025", false),
            fixture("undated", "Business", "not a date", true),
        ]
    }

    fn ids(v: &[&Article]) -> Vec<String> {
        v.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_by_category_ignores_case() {
        let articles = articles();
        assert_eq!(
            vec!["tech-a", "tech-b", "tech-c"],
            ids(&by_category(&articles, "TECHNOLOGY")),
        );
        assert!(by_category(&articles, "Gardening").is_empty());
    }

    #[test]
    fn test_latest_orders_and_limits() {
        let articles = articles();
        assert_eq!(
            vec!["biz-a", "life-a", "tech-a", "tech-b"],
            ids(&latest(&articles, 4)),
        );
        let all = latest(&articles, 100);
        assert_eq!(articles.len(), all.len());
        assert_eq!("undated", all.last().unwrap().id);
        assert!(latest(&articles, 0).is_empty());
    }

    #[test]
    fn test_featured_is_subset() {
        let articles = articles();
        let featured = featured(&articles, 9);
        assert_eq!(vec!["biz-a", "life-a", "tech-a", "undated"], ids(&featured));
        assert!(featured.iter().all(|a| a.featured));
        assert_eq!(2, super::featured(&articles, 2).len());
    }

    #[test]
    fn test_related_same_category_first() {
        let articles = articles();
        let current = &articles[0];
        assert_eq!(
            vec!["tech-b", "tech-c"],
            ids(&related(&articles, current, RELATED_LIMIT)),
        );
    }

    #[test]
    fn test_related_backfills_without_duplicates() {
        let articles = articles();
        let current = &articles[1]; // the only Lifestyle article
        let related = related(&articles, current, RELATED_LIMIT);
        assert_eq!(vec!["biz-a", "tech-a"], ids(&related));

        let current = &articles[5]; // biz-b: one other dated Business article
        let related = super::related(&articles, current, 3);
        assert_eq!(vec!["biz-a", "undated", "life-a"], ids(&related));
        assert!(related.iter().all(|a| a.id != current.id));
    }

    #[test]
    fn test_related_exhausted_pool() {
        let articles = vec![
            fixture("only", "News", "01 August 2025", false),
            fixture("other", "Food", "02 August 2025", false),
        ];
        assert_eq!(vec!["other"], ids(&related(&articles, &articles[0], 2)));
    }

    #[test]
    fn test_find_by_id_first_match() {
        let mut articles = articles();
        let mut duplicate = fixture("tech-a", "Business", "01 June 2025", false);
        duplicate.title = String::from("Duplicate");
        articles.push(duplicate);
        assert_eq!(
            "Technology",
            find_by_id(&articles, "tech-a").unwrap().category,
        );
        assert!(find_by_id(&articles, "missing").is_none());
    }

    #[test]
    fn test_search_fields() {
        let mut articles = articles();
        articles[3].title = String::from("The AI Revolution");
        articles[5].excerpt = String::from("Remote work and SUSTAINABILITY");
        assert_eq!(vec!["tech-b", "biz-b"], ids(&search(&articles, "ai")));
        assert_eq!(
            vec!["life-a"],
            ids(&search(&articles, "lifestyle")),
        );
        assert!(search(&articles, "zebra").is_empty());
    }
}

//! Filter and paginate the catalog.
//!
//! Pure functions over the promotion list: no store access, no rendering.
//! The saved-set is passed in by the caller, which reads it fresh from the
//! store for every run.

use crate::models::Promotion;

/// Which chip is selected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, promo: &Promotion) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => promo.has_tag(tag),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Criteria<'a> {
    pub tag: &'a TagFilter,
    pub search: &'a str,
    pub saved_only: bool,
    pub saved: &'a [String],
}

impl Criteria<'_> {
    fn matches(&self, promo: &Promotion, needle: &str) -> bool {
        if self.saved_only && !self.saved.iter().any(|id| *id == promo.id) {
            return false;
        }
        if !self.tag.matches(promo) {
            return false;
        }
        needle.is_empty() || promo.search_text().contains(needle)
    }
}

/// Promotions matching `criteria`, in catalog order.
pub fn filter_promos<'a>(promos: &'a [Promotion], criteria: &Criteria<'_>) -> Vec<&'a Promotion> {
    let needle = criteria.search.trim().to_lowercase();
    promos.iter().filter(|p| criteria.matches(p, &needle)).collect()
}

/// Number of pages for `count` items, never less than one.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page into `[1, total]`.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.min(total).max(1)
}

/// One page of filtered results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<'a> {
    pub items: Vec<&'a Promotion>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl PageSlice<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

pub fn paginate<'a>(filtered: &[&'a Promotion], page: usize, per_page: usize) -> PageSlice<'a> {
    let per_page = per_page.max(1);
    let total = total_pages(filtered.len(), per_page);
    let page = clamp_page(page, total);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(filtered.len());
    PageSlice {
        items: filtered.get(start..end).unwrap_or_default().to_vec(),
        page,
        total_pages: total,
        total_items: filtered.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(id: &str, title: &str, brand: Option<&str>, tags: &[&str]) -> Promotion {
        Promotion {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            brand: brand.map(str::to_string),
            image: String::new(),
            link: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            terms: None,
        }
    }

    fn catalog(n: usize) -> Vec<Promotion> {
        (0..n)
            .map(|i| {
                let tag = if i % 3 == 0 { "food" } else { "travel" };
                promo(&i.to_string(), &format!("Deal {}", i), None, &[tag])
            })
            .collect()
    }

    fn criteria<'a>(tag: &'a TagFilter, search: &'a str) -> Criteria<'a> {
        Criteria { tag, search, saved_only: false, saved: &[] }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 30), 1);
        assert_eq!(total_pages(30, 30), 1);
        assert_eq!(total_pages(31, 30), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(5, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
        assert_eq!(clamp_page(2, 2), 2);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let promos = vec![
            promo("1", "Cold drinks", Some("Soda Co"), &[]),
            promo("2", "Flights", Some("AirCo"), &[]),
            promo("3", "SODA fountain", None, &[]),
        ];
        let all = TagFilter::All;
        let ids: Vec<_> = filter_promos(&promos, &criteria(&all, "  soda "))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_search_matches_subtitle() {
        let mut p = promo("1", "Card", None, &[]);
        p.subtitle = Some("Cashback 10%".to_string());
        let promos = vec![p];
        let all = TagFilter::All;
        assert_eq!(filter_promos(&promos, &criteria(&all, "CASHBACK")).len(), 1);
    }

    #[test]
    fn test_tag_filter_exact_membership() {
        let promos = vec![
            promo("1", "a", None, &["food"]),
            promo("2", "b", None, &["Food"]),
            promo("3", "c", None, &[]),
        ];
        let food = TagFilter::Tag("food".to_string());
        let ids: Vec<_> = filter_promos(&promos, &criteria(&food, ""))
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);

        let stale = TagFilter::Tag("gone".to_string());
        assert!(filter_promos(&promos, &criteria(&stale, "")).is_empty());
    }

    #[test]
    fn test_saved_only_excludes_unsaved() {
        let promos = catalog(5);
        let saved = vec!["3".to_string(), "1".to_string()];
        let all = TagFilter::All;
        let c = Criteria { tag: &all, search: "", saved_only: true, saved: &saved };
        let ids: Vec<_> = filter_promos(&promos, &c).iter().map(|p| p.id.as_str()).collect();
        // Catalog order, not saved order
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_saved_only_with_empty_saved_set() {
        let promos = catalog(5);
        let all = TagFilter::All;
        let c = Criteria { tag: &all, search: "", saved_only: true, saved: &[] };
        assert!(filter_promos(&promos, &c).is_empty());
    }

    #[test]
    fn test_pages_partition_filtered_list() {
        let promos = catalog(47);
        let filters = [TagFilter::All, TagFilter::Tag("food".into()), TagFilter::Tag("none".into())];
        for tag in &filters {
            for search in ["", "deal 1", "zzz"] {
                for per_page in [1, 7, 10, 30, 100] {
                    let filtered = filter_promos(&promos, &criteria(tag, search));
                    let first = paginate(&filtered, 1, per_page);

                    let mut joined = Vec::new();
                    for page in 1..=first.total_pages {
                        let slice = paginate(&filtered, page, per_page);
                        assert!(slice.items.len() <= per_page);
                        assert_eq!(slice.page, page);
                        joined.extend(slice.items);
                    }
                    assert_eq!(joined, filtered);
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_page_clamps_to_last() {
        let promos = catalog(40);
        let all = TagFilter::All;
        let filtered = filter_promos(&promos, &criteria(&all, ""));
        let slice = paginate(&filtered, 5, 30);
        assert_eq!(slice.total_pages, 2);
        assert_eq!(slice.page, 2);
        assert_eq!(slice.items.len(), 10);
        assert!(slice.has_prev());
        assert!(!slice.has_next());
    }

    #[test]
    fn test_empty_filter_yields_single_empty_page() {
        let filtered: Vec<&Promotion> = Vec::new();
        let slice = paginate(&filtered, 3, 30);
        assert_eq!(slice.page, 1);
        assert_eq!(slice.total_pages, 1);
        assert!(slice.is_empty());
    }
}

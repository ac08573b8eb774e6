//! Catalog filter/sort/paginate pipeline
//!
//! [`compute_visible_page`] turns the full list fetched by a screen and the
//! user's current selections into the page to render. It is a pure
//! function; callers debounce search input themselves.
//!
//! Stages run in a fixed order:
//!
//! 1. search (title and subtitle, case-insensitive, trimmed query)
//! 2. category (exact match)
//! 3. price range
//! 4. open now
//! 5. distance radius
//! 6. stable sort
//! 7. paginate

use crate::catalog::CatalogItem;
use crate::filters::{DistanceFilter, FilterOptions, PriceRange, SortBy};
use std::cmp::Ordering;

/// Number of items on one page
pub const ITEMS_PER_PAGE: usize = 15;

/// One page of the filtered and sorted list
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    /// Items on the requested page, in display order
    pub items: Vec<&'a CatalogItem>,
    /// Number of pages; 0 means nothing matched
    pub total_pages: usize,
    /// Number of items that passed the filters
    pub total_items: usize,
}

impl<'a> CatalogPage<'a> {
    /// Whether the screen should show its empty state
    pub fn is_empty_state(&self) -> bool {
        self.total_pages == 0
    }

    /// Identifiers of the items on the page
    pub fn ids(&self) -> Vec<&'a str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

/// Compute the visible page for the given selections
///
/// `page` is 1-indexed; 0 is treated as 1 and pages past the end come back
/// empty with the real `total_pages`.
pub fn compute_visible_page<'a>(
    items: &'a [CatalogItem],
    search_query: &str,
    selected_category: Option<&str>,
    filters: &FilterOptions,
    page: usize,
) -> CatalogPage<'a> {
    let filtered = filter_and_sort(items, search_query, selected_category, filters);
    let total_items = filtered.len();

    CatalogPage {
        items: paginate(&filtered, page),
        total_pages: total_pages(total_items),
        total_items,
    }
}

/// Run every stage except pagination
pub fn filter_and_sort<'a>(
    items: &'a [CatalogItem],
    search_query: &str,
    selected_category: Option<&str>,
    filters: &FilterOptions,
) -> Vec<&'a CatalogItem> {
    let query = search_query.trim().to_lowercase();

    let mut filtered: Vec<&CatalogItem> = items
        .iter()
        .filter(|item| matches_search(item, &query))
        .filter(|item| matches_category(item, selected_category))
        .filter(|item| matches_price_range(item, filters.price_range))
        .filter(|item| !filters.open_now || item.available)
        .filter(|item| matches_distance(item, filters.distance))
        .collect();

    sort_items(&mut filtered, filters.sort_by);
    filtered
}

/// Search stage; `query` must already be trimmed and lower-cased
fn matches_search(item: &CatalogItem, query: &str) -> bool {
    query.is_empty()
        || item.title.to_lowercase().contains(query)
        || item.subtitle.to_lowercase().contains(query)
}

fn matches_category(item: &CatalogItem, category: Option<&str>) -> bool {
    category.map_or(true, |category| item.category == category)
}

fn matches_price_range(item: &CatalogItem, range: PriceRange) -> bool {
    range.contains(item.price)
}

fn matches_distance(item: &CatalogItem, distance: DistanceFilter) -> bool {
    match distance.max_km() {
        None => true,
        Some(max) => item.distance_km().is_some_and(|km| km <= max),
    }
}

/// Stable sort by the selected criterion
pub fn sort_items(items: &mut [&CatalogItem], sort_by: SortBy) {
    match sort_by {
        SortBy::Popular => {}
        SortBy::PriceAsc => items.sort_by_key(|item| item.price),
        SortBy::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => items.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Distance => items.sort_by(|a, b| compare_distance(a, b)),
    }
}

/// Ascending distance, unknown distance sorts last
fn compare_distance(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    let a = a.distance_km().unwrap_or(f64::INFINITY);
    let b = b.distance_km().unwrap_or(f64::INFINITY);
    a.total_cmp(&b)
}

/// `ceil(count / ITEMS_PER_PAGE)`
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(ITEMS_PER_PAGE)
}

/// Slice out a 1-indexed page
pub fn paginate<'a>(items: &[&'a CatalogItem], page: usize) -> Vec<&'a CatalogItem> {
    let start = page.max(1).saturating_sub(1).saturating_mul(ITEMS_PER_PAGE);
    items.iter().skip(start).take(ITEMS_PER_PAGE).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::Price;

    fn item(id: &str, price: u64, rating: f32) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: format!("Dish {}", id),
            subtitle: "Quan Ngon".to_string(),
            price: Price(price),
            rating,
            rating_count: String::new(),
            category: "rice".to_string(),
            available: true,
            image: None,
            distance: None,
        }
    }

    fn many(count: usize) -> Vec<CatalogItem> {
        (0..count).map(|i| item(&i.to_string(), 10_000 + i as u64, 4.0)).collect()
    }

    fn ids<'a>(items: &[&'a CatalogItem]) -> Vec<&'a str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    fn scenario() -> Vec<CatalogItem> {
        vec![item("1", 40_000, 4.5), item("2", 60_000, 4.8), item("3", 120_000, 4.2)]
    }

    #[test]
    fn test_price_asc_scenario() {
        let items = scenario();
        let filters = FilterOptions { sort_by: SortBy::PriceAsc, ..Default::default() };

        let page = compute_visible_page(&items, "", None, &filters, 1);
        assert_eq!(page.ids(), vec!["1", "2", "3"]);
        assert_eq!(page.total_pages, 1);

        let filters = FilterOptions { price_range: PriceRange::Under50, ..filters };
        let page = compute_visible_page(&items, "", None, &filters, 1);
        assert_eq!(page.ids(), vec!["1"]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_deterministic() {
        let mut items = many(40);
        items[3].rating = 4.9;
        items[17].rating = 4.9;
        let filters = FilterOptions { sort_by: SortBy::Rating, ..Default::default() };

        let first = compute_visible_page(&items, "dish", None, &filters, 2);
        let second = compute_visible_page(&items, "dish", None, &filters, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_query_is_identity() {
        let items = many(10);
        let filters = FilterOptions::default();

        for query in ["", "   ", "\t"] {
            let filtered = filter_and_sort(&items, query, None, &filters);
            let expected: Vec<&CatalogItem> = items.iter().collect();
            assert_eq!(filtered, expected);
        }
    }

    #[test]
    fn test_search_matches_title_and_subtitle() {
        let mut items = scenario();
        items[0].title = "Com Tam Suon".to_string();
        items[1].subtitle = "Tiem Com Nha".to_string();

        let filters = FilterOptions::default();
        let filtered = filter_and_sort(&items, "  COM ", None, &filters);
        assert_eq!(ids(&filtered), vec!["1", "2"]);
    }

    #[test]
    fn test_category_filter() {
        let mut items = scenario();
        items[1].category = "drinks".to_string();

        let filters = FilterOptions::default();
        assert_eq!(ids(&filter_and_sort(&items, "", Some("drinks"), &filters)), vec!["2"]);
        assert_eq!(ids(&filter_and_sort(&items, "", None, &filters)).len(), 3);
        assert!(filter_and_sort(&items, "", Some("Drinks"), &filters).is_empty());
    }

    #[test]
    fn test_popular_keeps_filtered_order() {
        let items = vec![item("c", 90_000, 3.0), item("a", 10_000, 5.0), item("b", 50_000, 4.0)];
        let filters = FilterOptions::default();

        let page = compute_visible_page(&items, "", None, &filters, 1);
        assert_eq!(page.ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_variants_are_stable() {
        let items = vec![
            item("a", 50_000, 4.0),
            item("b", 30_000, 4.5),
            item("c", 50_000, 4.5),
            item("d", 30_000, 4.0),
        ];

        let sorted = |sort_by| {
            let filters = FilterOptions { sort_by, ..Default::default() };
            ids(&filter_and_sort(&items, "", None, &filters))
        };

        assert_eq!(sorted(SortBy::PriceAsc), vec!["b", "d", "a", "c"]);
        assert_eq!(sorted(SortBy::PriceDesc), vec!["a", "c", "b", "d"]);
        assert_eq!(sorted(SortBy::Rating), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_distance_sort_puts_unknown_last() {
        let mut items = scenario();
        items[0].distance = Some("unknown".to_string());
        items[1].distance = Some("2.5 km".to_string());
        items[2].distance = Some("900 m".to_string());
        items.push(item("4", 10_000, 4.0));

        let filters = FilterOptions { sort_by: SortBy::Distance, ..Default::default() };
        let filtered = filter_and_sort(&items, "", None, &filters);
        assert_eq!(ids(&filtered), vec!["3", "2", "1", "4"]);
    }

    #[test]
    fn test_open_now() {
        let mut items = scenario();
        items[1].available = false;

        let filters = FilterOptions { open_now: true, ..Default::default() };
        assert_eq!(ids(&filter_and_sort(&items, "", None, &filters)), vec!["1", "3"]);
    }

    #[test]
    fn test_distance_radius_drops_far_and_unknown() {
        let mut items = scenario();
        items[0].distance = Some("0.8 km".to_string());
        items[1].distance = Some("3 km".to_string());

        let filters = FilterOptions { distance: DistanceFilter::Within3Km, ..Default::default() };
        assert_eq!(ids(&filter_and_sort(&items, "", None, &filters)), vec!["1", "2"]);

        let filters = FilterOptions { distance: DistanceFilter::Within1Km, ..Default::default() };
        assert_eq!(ids(&filter_and_sort(&items, "", None, &filters)), vec!["1"]);
    }

    #[test]
    fn test_price_range_boundaries() {
        let items = vec![item("low", 50_000, 4.0), item("high", 100_000, 4.0)];
        let with = |price_range| {
            let filters = FilterOptions { price_range, ..Default::default() };
            ids(&filter_and_sort(&items, "", None, &filters))
        };

        assert_eq!(with(PriceRange::From50To100), vec!["low", "high"]);
        assert!(with(PriceRange::Under50).is_empty());
        assert!(with(PriceRange::Over100).is_empty());
    }

    #[test]
    fn test_pages_cover_everything_once() {
        let items = many(47);
        let filters = FilterOptions { sort_by: SortBy::PriceDesc, ..Default::default() };
        let expected = ids(&filter_and_sort(&items, "", None, &filters));

        let first = compute_visible_page(&items, "", None, &filters, 1);
        assert_eq!(first.total_pages, 4);
        assert_eq!(first.total_items, 47);

        let mut collected = Vec::new();
        for page in 1..=first.total_pages {
            let visible = compute_visible_page(&items, "", None, &filters, page);
            assert!(visible.items.len() <= ITEMS_PER_PAGE);
            collected.extend(visible.ids());
        }
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let items = many(30);
        let page = compute_visible_page(&items, "", None, &FilterOptions::default(), 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 15);
        assert_eq!(page.items[0].id, "15");
    }

    #[test]
    fn test_empty_source() {
        let items: Vec<CatalogItem> = Vec::new();
        for page in [0, 1, 2, 99] {
            let visible = compute_visible_page(&items, "", None, &FilterOptions::default(), page);
            assert!(visible.items.is_empty());
            assert_eq!(visible.total_pages, 0);
            assert!(visible.is_empty_state());
        }
    }

    #[test]
    fn test_no_matches_looks_like_empty_source() {
        let items = many(5);
        let visible = compute_visible_page(&items, "nothing", None, &FilterOptions::default(), 1);
        assert_eq!(visible.total_pages, 0);
        assert!(visible.items.is_empty());
    }

    #[test]
    fn test_page_zero_and_past_end() {
        let items = many(20);
        let filters = FilterOptions::default();

        let zero = compute_visible_page(&items, "", None, &filters, 0);
        let one = compute_visible_page(&items, "", None, &filters, 1);
        assert_eq!(zero, one);

        let past = compute_visible_page(&items, "", None, &filters, 5);
        assert!(past.items.is_empty());
        assert_eq!(past.total_pages, 2);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(15), 1);
        assert_eq!(total_pages(16), 2);
    }
}

//! Local filter, sort and paginate.
//!
//! Pure functions deriving the displayed window from an in-memory collection.
//! Nothing here suspends or touches the network.

use super::modes::{SortDirection, SortSpec};
use crate::domain::record::{compare_on, Record};

/// Items whose search fields contain `term`, case-insensitively.
///
/// An empty or whitespace-only term keeps every item. Original order is
/// preserved.
#[must_use]
pub fn filter<'a, T: Record>(items: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.trim().to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}

/// Stable sort on one field; `None` leaves the order untouched.
pub fn sort<T: Record>(items: &mut [&T], spec: Option<&SortSpec>) {
    let Some(spec) = spec else {
        return;
    };
    items.sort_by(|a, b| {
        let ordering = compare_on(*a, *b, &spec.field);
        match spec.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// `ceil(len / page_size)`; zero items means zero pages.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = if page_size == 0 { 1 } else { page_size };
    len.div_ceil(page_size)
}

/// Clamps a 1-based page number into `[1, total_pages]`.
///
/// With no pages at all the only valid page is 1.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The 1-based `page` window of `items`.
#[must_use]
pub fn window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        title: String,
        rank: f64,
    }

    impl Record for Row {
        const SORT_FIELDS: &'static [&'static str] = &["title", "rank"];

        fn id(&self) -> &str {
            &self.id
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![&self.title]
        }

        fn field(&self, name: &str) -> Option<FieldValue<'_>> {
            match name {
                "title" => Some(FieldValue::Text(&self.title)),
                "rank" => Some(FieldValue::Number(self.rank)),
                _ => None,
            }
        }
    }

    fn rows(titles: &[&str]) -> Vec<Row> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Row {
                id: i.to_string(),
                title: (*t).to_string(),
                #[allow(clippy::cast_precision_loss)]
                rank: (titles.len() - i) as f64,
            })
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive() {
        let items = rows(&["Dune", "Emma", "dune messiah"]);
        let titles: Vec<_> = filter(&items, "DUNE").iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "dune messiah"]);
    }

    #[test]
    fn filter_is_idempotent() {
        let items = rows(&["Dune", "Emma", "dune messiah", "Sandworm"]);
        let once: Vec<Row> = filter(&items, "un").into_iter().cloned().collect();
        let twice: Vec<Row> = filter(&once, "un").into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_term_keeps_everything() {
        let items = rows(&["a", "b"]);
        assert_eq!(filter(&items, "  ").len(), 2);
    }

    #[test]
    fn opposite_directions_reverse_each_other() {
        let items = rows(&["Mango", "Apple", "Zest", "Kiwi"]);
        let mut asc: Vec<&Row> = items.iter().collect();
        let mut desc: Vec<&Row> = items.iter().collect();
        sort(&mut asc, Some(&SortSpec::ascending("title")));
        sort(&mut desc, Some(&SortSpec::descending("title")));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn numeric_fields_sort_numerically() {
        let items = rows(&["a", "b", "c"]);
        let mut refs: Vec<&Row> = items.iter().collect();
        sort(&mut refs, Some(&SortSpec::ascending("rank")));
        let titles: Vec<_> = refs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn no_sort_preserves_order() {
        let items = rows(&["b", "a"]);
        let mut refs: Vec<&Row> = items.iter().collect();
        sort(&mut refs, None);
        assert_eq!(refs[0].title, "b");
    }

    #[test]
    fn windows_cover_every_item_exactly_once() {
        for n in 0..20 {
            for page_size in 1..7 {
                let items: Vec<usize> = (0..n).collect();
                let pages = total_pages(n, page_size);
                assert_eq!(pages, n.div_ceil(page_size));
                let joined: Vec<usize> = (1..=pages)
                    .flat_map(|p| window(&items, p, page_size).to_vec())
                    .collect();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn clamp_keeps_page_in_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(4, 0), 1);
    }
}

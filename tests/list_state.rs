mod common;

use common::{book, books};
use folio::app::{handle_event, Action, ListEvent, ListState, SortDirection};
use folio::domain::Book;
use folio::ui;

fn titles(state: &ListState<Book>) -> Vec<String> {
    state
        .view()
        .items
        .iter()
        .map(|b| b.title.clone())
        .collect()
}

fn ids(state: &ListState<Book>) -> Vec<String> {
    state.view().items.iter().map(|b| b.id.clone()).collect()
}

#[test]
fn sorting_by_title_ascending_orders_alphabetically() {
    let mut state = ListState::with_items(vec![book("1", "Zed"), book("2", "Amy")], 10);

    handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();

    assert_eq!(titles(&state), vec!["Amy", "Zed"]);
    assert_eq!(
        state.sort().map(|s| s.direction),
        Some(SortDirection::Ascending)
    );
}

#[test]
fn seven_items_in_pages_of_four() {
    let mut state = ListState::with_items(books(7), 4);

    assert_eq!(state.total_pages(), 2);
    assert_eq!(ids(&state), vec!["b1", "b2", "b3", "b4"]);

    let (changed, _) = handle_event(&mut state, &ListEvent::GoToPage(2)).unwrap();
    assert!(changed);
    assert_eq!(ids(&state), vec!["b5", "b6", "b7"]);

    let (changed, _) = handle_event(&mut state, &ListEvent::GoToPage(3)).unwrap();
    assert!(!changed);
    assert_eq!(state.page(), 2);
    assert_eq!(ids(&state), vec!["b5", "b6", "b7"]);
}

#[test]
fn next_page_stops_at_the_last_page() {
    let mut state = ListState::with_items(books(5), 4);
    handle_event(&mut state, &ListEvent::NextPage).unwrap();
    let (changed, _) = handle_event(&mut state, &ListEvent::NextPage).unwrap();
    assert!(!changed);
    assert_eq!(state.page(), 2);
}

#[test]
fn changing_the_search_resets_to_first_page() {
    let mut state = ListState::with_items(books(12), 4);
    state.go_to_page(3);
    assert_eq!(state.page(), 3);

    handle_event(&mut state, &ListEvent::SetSearch("book".to_string())).unwrap();
    assert_eq!(state.page(), 1);

    state.go_to_page(2);
    handle_event(&mut state, &ListEvent::Char('1')).unwrap();
    assert_eq!(state.search(), "book1");
    assert_eq!(state.page(), 1);
}

#[test]
fn changing_the_sort_resets_to_first_page() {
    let mut state = ListState::with_items(books(12), 4);
    state.go_to_page(3);
    handle_event(&mut state, &ListEvent::SortBy("price".to_string())).unwrap();
    assert_eq!(state.page(), 1);
}

#[test]
fn search_is_case_insensitive_over_title_author_and_category() {
    let mut dune = book("d", "Dune");
    dune.author = "Frank Herbert".to_string();
    dune.category = "Science Fiction".to_string();
    let mut state = ListState::with_items(vec![dune, book("e", "Emma")], 10);

    for term in ["DUNE", "herbert", "science"] {
        state.set_search(term);
        assert_eq!(ids(&state), vec!["d"], "term {term}");
    }
}

#[test]
fn toggling_the_same_field_reverses_the_order() {
    let mut state = ListState::with_items(
        vec![book("1", "Cara"), book("2", "Amy"), book("3", "Bo")],
        10,
    );

    handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
    let ascending = titles(&state);
    handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
    let mut descending = titles(&state);
    descending.reverse();

    assert_eq!(ascending, descending);
}

#[test]
fn clearing_the_sort_restores_fetch_order() {
    let mut state = ListState::with_items(vec![book("1", "Zed"), book("2", "Amy")], 10);
    handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
    handle_event(&mut state, &ListEvent::ClearSort).unwrap();
    assert_eq!(titles(&state), vec!["Zed", "Amy"]);
}

#[test]
fn unknown_sort_field_becomes_a_notice() {
    let mut state = ListState::with_items(books(3), 10);
    let (_, actions) = handle_event(&mut state, &ListEvent::SortBy("isbn".to_string())).unwrap();
    assert!(matches!(actions.as_slice(), [Action::Notify(_)]));
    assert!(state.sort().is_none());
}

#[test]
fn pages_cover_the_filtered_sequence_without_gaps() {
    for (n, page_size) in [(0, 3), (1, 1), (9, 3), (10, 3), (23, 5)] {
        let mut state = ListState::with_items(books(n), page_size);
        let expected: Vec<String> = state.matching().iter().map(|b| b.id.clone()).collect();
        assert_eq!(state.total_pages(), n.div_ceil(page_size));

        let mut seen = Vec::new();
        for page in 1..=state.total_pages() {
            state.go_to_page(page);
            seen.extend(ids(&state));
        }
        assert_eq!(seen, expected, "n={n} page_size={page_size}");
    }
}

#[test]
fn refresh_and_close_emit_actions() {
    let mut state: ListState<Book> = ListState::new(4);
    let (_, actions) = handle_event(&mut state, &ListEvent::Refresh).unwrap();
    assert_eq!(actions, vec![Action::Fetch]);

    let (_, actions) = handle_event(&mut state, &ListEvent::Close).unwrap();
    assert_eq!(actions, vec![Action::Exit]);
    assert!(state.is_closed());
}

#[test]
fn empty_search_result_says_so() {
    let mut state = ListState::with_items(books(3), 10);
    state.set_search("nothing like this");

    let vm = state.compute_viewmodel();
    assert!(vm.rows.is_empty());
    let empty = vm.empty_state.unwrap();
    assert!(empty.message.contains("No books"));

    let out = ui::render(&state, 80);
    assert!(out.contains("Search: nothing like this"));
}

#[test]
fn rendered_page_reports_position_and_sort() {
    let mut state = ListState::with_items(books(7), 4);
    handle_event(&mut state, &ListEvent::SortBy("title".to_string())).unwrap();
    handle_event(&mut state, &ListEvent::NextPage).unwrap();

    let out = ui::render(&state, 100);
    assert!(out.contains("Books (7)"));
    assert!(out.contains("page 2 of 2"));
    assert!(out.contains("sorted by title"));
}

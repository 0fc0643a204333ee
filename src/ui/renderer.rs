//! Top-level rendering.
//!
//! Turns list state and detail records into plain text for the terminal.
//! Nothing here prints; callers decide where the string goes.
//!
//! # Example
//!
//! ```rust
//! use folio::app::ListState;
//! use folio::domain::Book;
//! use folio::ui::render;
//!
//! let state: ListState<Book> = ListState::new(10);
//! let text = render(&state, 80);
//! assert!(text.contains("No books found"));
//! ```

use crate::app::ListState;
use crate::domain::{Book, Cart, Order, Record, Session};
use crate::ui::components;
use crate::ui::tabular::{money, Tabular};
use crate::ui::viewmodel::TableViewModel;

/// Renders a list screen.
#[must_use]
pub fn render<T: Record + Tabular>(state: &ListState<T>, width: usize) -> String {
    render_viewmodel(&state.compute_viewmodel(), width)
}

/// Renders a precomputed view model.
#[must_use]
pub fn render_viewmodel(vm: &TableViewModel, width: usize) -> String {
    let mut out = String::new();
    components::render_list(&mut out, vm, width);
    out
}

/// Product details page.
#[must_use]
pub fn render_book(book: &Book) -> String {
    let mut out = format!("{}\nby {}\n\n", book.title, book.author);
    out.push_str(&format!("Category: {}\n", book.category));
    out.push_str(&format!("Price:    {}\n", money(book.display_price())));
    out.push_str(&format!(
        "Stock:    {}\n",
        if book.in_stock() {
            book.display_quantity().to_string()
        } else {
            "out of stock".to_string()
        }
    ));
    if let Some(image) = &book.image {
        out.push_str(&format!("Image:    {image}\n"));
    }
    if !book.description.is_empty() {
        out.push('\n');
        out.push_str(&book.description);
        out.push('\n');
    }
    out
}

#[must_use]
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.\n".to_string();
    }
    let columns: Vec<String> = ["BOOK", "TITLE", "QTY", "PRICE", "SUBTOTAL"]
        .iter()
        .map(|c| (*c).to_string())
        .collect();
    let rows: Vec<Vec<String>> = cart
        .lines
        .iter()
        .map(|line| {
            vec![
                line.book_id.clone(),
                line.title.clone(),
                format!("{}/{}", line.quantity, line.stock),
                money(line.unit_price),
                money(line.subtotal()),
            ]
        })
        .collect();

    let mut out = String::new();
    components::render_plain_table(&mut out, &columns, &rows);
    out.push_str(&format!("\nTotal: {}\n", money(cart.total())));
    out
}

/// Confirmation after checkout.
#[must_use]
pub fn render_order_placed(order: Option<&Order>) -> String {
    order.map_or_else(
        || "Order placed.\n".to_string(),
        |order| {
            format!(
                "Order {} placed: {} copies, {} ({})\n",
                order.id,
                order.copies(),
                money(order.total_price),
                order.status
            )
        },
    )
}

/// Profile page with the dashboard sections the role unlocks.
#[must_use]
pub fn render_profile(session: &Session, sections: &[&str]) -> String {
    let user = &session.user;
    let mut out = format!("{} <{}>\nrole: {}\n", user.name, user.email, user.role);
    if let Some(joined) = user.created_at {
        out.push_str(&format!("joined: {}\n", joined.format("%Y-%m-%d")));
    }
    if !sections.is_empty() {
        out.push_str("\nDashboard:\n");
        for section in sections {
            out.push_str(&format!("  - {section}\n"));
        }
    }
    out
}

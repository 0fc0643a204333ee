//! Command-line surface.
//!
//! Subcommands stand in for the storefront's pages: `books` is the catalogue,
//! `book` the product page, `cart`/`checkout` the checkout flow, `whoami` the
//! profile, and `admin` the role-gated dashboard.

use clap::{Args, Parser, Subcommand};
use folio::app::ListEvent;
use folio::domain::{BookDraft, OrderStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/folio/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API origin, overriding config and FOLIO_API_BASE
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and persist the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Create an account
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Show the signed-in profile and dashboard sections
    Whoami,
    /// Browse the catalogue
    Books(ListArgs),
    /// Show one book
    Book { id: String },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },
    /// Place an order for the cart's contents
    Checkout,
    /// List your orders
    MyOrders(ListArgs),
    /// Back-office commands (admin only)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

/// Search, sort and page options shared by every list.
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive search term
    #[arg(long, short)]
    pub search: Option<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// 1-based page number
    #[arg(long, short, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    /// The list events these options amount to, in order.
    pub fn events(&self) -> Vec<ListEvent> {
        let mut events = Vec::new();
        if let Some(term) = &self.search {
            events.push(ListEvent::SetSearch(term.clone()));
        }
        if let Some(field) = &self.sort {
            events.push(ListEvent::SortBy(field.clone()));
            if self.desc {
                events.push(ListEvent::SortBy(field.clone()));
            }
        }
        if self.page > 1 {
            events.push(ListEvent::GoToPage(self.page));
        }
        events
    }
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    /// Add copies of a book
    Add {
        book_id: String,
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity (0 removes it)
    Set { book_id: String, quantity: u32 },
    /// Remove a book
    Remove { book_id: String },
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Manage the catalogue
    Book {
        #[command(subcommand)]
        command: BookCommand,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },
    /// Show total revenue
    Revenue,
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookCommand {
    Create(BookFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: BookEdit,
    },
    Delete { id: String },
}

#[derive(Args, Debug)]
pub struct BookFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value_t = 0)]
    pub quantity: u32,
    #[arg(long)]
    pub image: Option<String>,
}

impl From<BookFields> for BookDraft {
    fn from(fields: BookFields) -> Self {
        Self {
            title: fields.title,
            author: fields.author,
            price: fields.price,
            category: fields.category,
            description: fields.description,
            quantity: fields.quantity,
            image: fields.image,
        }
    }
}

/// Fields to change; anything left out keeps its current value.
#[derive(Args, Debug)]
pub struct BookEdit {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub quantity: Option<u32>,
    #[arg(long)]
    pub image: Option<String>,
}

impl BookEdit {
    /// Overlays the given fields on an existing draft.
    pub fn apply(self, mut draft: BookDraft) -> BookDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(author) = self.author {
            draft.author = author;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if self.image.is_some() {
            draft.image = self.image;
        }
        draft
    }
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    List(ListArgs),
    /// Move an order to a new status
    Status { id: String, status: OrderStatus },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(ListArgs),
    /// Block or unblock a user
    Toggle { id: String },
}

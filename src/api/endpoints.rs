//! Routes of the bookshop API.
//!
//! Each [`Endpoint`] knows its method, its path and whether it needs a bearer
//! token, so request construction lives in one table rather than being spread
//! across call sites.

use std::fmt;

/// HTTP method subset the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Patch => Self::PATCH,
            Method::Delete => Self::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        })
    }
}

/// One API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ListBooks,
    GetBook(String),
    CreateBook,
    UpdateBook(String),
    DeleteBook(String),
    PlaceOrder,
    AllOrders,
    Revenue,
    MyOrders,
    UpdateOrderStatus(String),
    DeleteOrder(String),
    AllUsers,
    UpdateUserStatus(String),
    Register,
    Login,
}

impl Endpoint {
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::ListBooks
            | Self::GetBook(_)
            | Self::AllOrders
            | Self::Revenue
            | Self::MyOrders
            | Self::AllUsers => Method::Get,
            Self::CreateBook | Self::PlaceOrder | Self::Register | Self::Login => Method::Post,
            Self::UpdateBook(_) => Method::Put,
            Self::UpdateOrderStatus(_) | Self::UpdateUserStatus(_) => Method::Patch,
            Self::DeleteBook(_) | Self::DeleteOrder(_) => Method::Delete,
        }
    }

    /// Path relative to the API origin.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ListBooks | Self::CreateBook => "/api/books".to_string(),
            Self::GetBook(id) | Self::UpdateBook(id) | Self::DeleteBook(id) => {
                format!("/api/books/{id}")
            }
            Self::PlaceOrder => "/api/orders".to_string(),
            Self::AllOrders => "/api/orders/all".to_string(),
            Self::Revenue => "/api/orders/revenue".to_string(),
            Self::MyOrders => "/api/orders/my-orders".to_string(),
            Self::UpdateOrderStatus(id) => format!("/api/orders/{id}/status"),
            Self::DeleteOrder(id) => format!("/api/orders/{id}"),
            Self::AllUsers => "/api/users/all".to_string(),
            Self::UpdateUserStatus(id) => format!("/api/users/{id}/status"),
            Self::Register => "/api/users/register".to_string(),
            Self::Login => "/api/auth/login".to_string(),
        }
    }

    /// Whether the request must carry `Authorization: Bearer`.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::ListBooks | Self::GetBook(_) | Self::Register | Self::Login
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

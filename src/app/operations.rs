//! Per-resource mutations for the storefront and back-office screens.
//!
//! [`Operations`] pairs an [`ApiClient`] with the current [`AuthState`] and
//! turns each user action into a dispatched [`Mutation`]. Capability checks
//! run inside the dispatched future, so a denied action is reported through
//! the same notice path as a server rejection and never touches the network.

use super::capabilities::{self, Capability};
use super::collection::Mutation;
use super::dispatcher::{dispatch, DispatchOutcome};
use super::state::ListState;
use crate::api::{ApiClient, CancellationToken, Transport};
use crate::domain::error::{FolioError, Result};
use crate::domain::{AuthState, Book, BookDraft, Cart, Order, OrderStatus, User};

/// Mutating actions available to a session.
#[derive(Debug)]
pub struct Operations<'a, T: Transport> {
    client: &'a ApiClient<T>,
    auth: &'a AuthState,
}

impl<'a, T: Transport> Operations<'a, T> {
    pub const fn new(client: &'a ApiClient<T>, auth: &'a AuthState) -> Self {
        Self { client, auth }
    }

    fn require(&self, capability: Capability) -> Result<()> {
        capabilities::require(self.auth, capability)
    }

    /// Adds a book to the catalogue.
    pub async fn create_book(
        &self,
        books: &mut ListState<Book>,
        draft: &BookDraft,
    ) -> DispatchOutcome {
        dispatch(books, "Book added", async {
            self.require(Capability::ManageBooks)?;
            let book = self.client.create_book(self.auth, draft).await?;
            Ok(Mutation::Created(book))
        })
        .await
    }

    /// Saves an edit; falls back to the local copy with the draft applied
    /// when the API does not echo the book. With neither, the edit still
    /// counts as applied.
    pub async fn update_book(
        &self,
        books: &mut ListState<Book>,
        id: &str,
        draft: &BookDraft,
    ) -> DispatchOutcome {
        let fallback = books.get(id).map(|book| draft.apply_to(book));
        dispatch(books, "Book updated", async {
            self.require(Capability::ManageBooks)?;
            let echoed = self.client.update_book(self.auth, id, draft).await?;
            Ok(echoed
                .or(fallback)
                .map_or_else(|| Mutation::Confirmed(id.to_string()), Mutation::Updated))
        })
        .await
    }

    pub async fn delete_book(&self, books: &mut ListState<Book>, id: &str) -> DispatchOutcome {
        dispatch(books, "Book deleted", async {
            self.require(Capability::ManageBooks)?;
            self.client.delete_book(self.auth, id).await?;
            Ok(Mutation::Deleted(id.to_string()))
        })
        .await
    }

    /// Moves an order to `status`.
    ///
    /// Transitions the local status machine does not offer are still sent;
    /// the API decides.
    pub async fn set_order_status(
        &self,
        orders: &mut ListState<Order>,
        id: &str,
        status: OrderStatus,
    ) -> DispatchOutcome {
        let current = orders.get(id).cloned();
        if let Some(order) = &current {
            if !order.status.can_become(status) {
                tracing::warn!(
                    id = %id,
                    from = %order.status,
                    to = %status,
                    "transition not offered locally, sending anyway"
                );
            }
        }
        let fallback = current.map(|order| Order { status, ..order });
        dispatch(orders, "Order status updated", async {
            self.require(Capability::ManageOrders)?;
            let echoed = self.client.update_order_status(self.auth, id, status).await?;
            Ok(echoed
                .or(fallback)
                .map_or_else(|| Mutation::Confirmed(id.to_string()), Mutation::Updated))
        })
        .await
    }

    pub async fn delete_order(&self, orders: &mut ListState<Order>, id: &str) -> DispatchOutcome {
        dispatch(orders, "Order deleted", async {
            self.require(Capability::ManageOrders)?;
            self.client.delete_order(self.auth, id).await?;
            Ok(Mutation::Deleted(id.to_string()))
        })
        .await
    }

    /// Toggles a user between `user` and `Blocked`.
    pub async fn toggle_user(&self, users: &mut ListState<User>, id: &str) -> DispatchOutcome {
        let current = users.get(id).cloned();
        dispatch(users, "User status updated", async {
            self.require(Capability::ManageUsers)?;
            let user = current.ok_or_else(|| FolioError::NotFound(id.to_string()))?;
            let role = user.role.toggled()?;
            let echoed = self.client.update_user_role(self.auth, id, role).await?;
            Ok(Mutation::Updated(echoed.unwrap_or(User { role, ..user })))
        })
        .await
    }

    /// Places an order for the cart's contents.
    ///
    /// The cart itself is left alone; callers clear it once this succeeds.
    ///
    /// # Errors
    ///
    /// Capability, validation (empty cart), token and API errors, or
    /// [`FolioError::Cancelled`] if `cancel` fires first.
    pub async fn checkout(&self, cart: &Cart, cancel: &CancellationToken) -> Result<Option<Order>> {
        self.require(Capability::Checkout)?;
        let order = cart.to_order()?;
        tracing::debug!(lines = order.items.len(), total = order.total_price, "checking out");
        cancel
            .run(self.client.place_order(self.auth, &order))
            .await
    }
}

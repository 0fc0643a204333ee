//! Typed client for the bookshop API.
//!
//! [`ApiClient`] turns [`Endpoint`]s into requests, attaches the bearer token
//! for authenticated routes, and decodes the response envelope. It holds no
//! state besides its transport: callers pass the current [`AuthState`] on every
//! call, so a logout between two calls takes effect immediately.

use super::endpoints::Endpoint;
use super::envelope::{error_from_body, Envelope};
use super::transport::{HttpRequest, Transport};
use crate::domain::error::{FolioError, Result};
use crate::domain::{
    AuthState, Book, BookDraft, Credentials, Order, OrderStatus, PlaceOrder, Registration,
    Revenue, Role, Session, User,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::Instrument;

/// Bookshop API client over any [`Transport`].
#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends one request and returns the checked envelope.
    ///
    /// The token is resolved before anything is sent, so an unauthenticated
    /// caller fails with [`FolioError::TokenNotFound`] without network access.
    async fn call(
        &self,
        endpoint: Endpoint,
        auth: Option<&AuthState>,
        body: Option<Value>,
    ) -> Result<Envelope> {
        let bearer = if endpoint.requires_auth() {
            let auth = auth.ok_or(FolioError::TokenNotFound)?;
            Some(auth.require_token()?.to_string())
        } else {
            auth.and_then(AuthState::token).map(str::to_string)
        };

        let request = HttpRequest {
            method: endpoint.method(),
            path: endpoint.path(),
            bearer,
            body,
        };

        let response = self
            .transport
            .send(request)
            .instrument(tracing::debug_span!("api_call", endpoint = %endpoint))
            .await?;
        tracing::debug!(endpoint = %endpoint, status = response.status, "api response");

        if !response.is_success() {
            let err = error_from_body(response.status, &response.body);
            tracing::debug!(endpoint = %endpoint, error = %err, "api call failed");
            return Err(err);
        }

        Envelope::parse(&response.body)?.ensure_success(response.status)
    }

    async fn list<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        auth: Option<&AuthState>,
    ) -> Result<Vec<R>> {
        self.call(endpoint, auth, None).await?.into_list()
    }

    fn encode<B: serde::Serialize>(body: &B) -> Result<Value> {
        serde_json::to_value(body).map_err(|e| FolioError::Validation(e.to_string()))
    }

    /// `GET /api/books`
    ///
    /// # Errors
    ///
    /// Network, API and envelope errors.
    pub async fn list_books(&self) -> Result<Vec<Book>> {
        self.list(Endpoint::ListBooks, None).await
    }

    /// `GET /api/books/:id`
    ///
    /// # Errors
    ///
    /// [`FolioError::NotFound`] when the API answers without a book.
    pub async fn get_book(&self, id: &str) -> Result<Book> {
        self.call(Endpoint::GetBook(id.to_string()), None, None)
            .await?
            .into_item()?
            .ok_or_else(|| FolioError::NotFound(id.to_string()))
    }

    /// `POST /api/books`
    ///
    /// # Errors
    ///
    /// Validation errors before sending; API errors after.
    pub async fn create_book(&self, auth: &AuthState, draft: &BookDraft) -> Result<Book> {
        draft.validate()?;
        self.call(Endpoint::CreateBook, Some(auth), Some(Self::encode(draft)?))
            .await?
            .into_item()?
            .ok_or_else(|| {
                FolioError::MalformedEnvelope("created book missing from response".to_string())
            })
    }

    /// `PUT /api/books/:id`; `None` when the API does not echo the book.
    ///
    /// # Errors
    ///
    /// Validation errors before sending; API errors after.
    pub async fn update_book(
        &self,
        auth: &AuthState,
        id: &str,
        draft: &BookDraft,
    ) -> Result<Option<Book>> {
        draft.validate()?;
        self.call(
            Endpoint::UpdateBook(id.to_string()),
            Some(auth),
            Some(Self::encode(draft)?),
        )
        .await?
        .into_item()
    }

    /// `DELETE /api/books/:id`
    ///
    /// # Errors
    ///
    /// Token, network and API errors.
    pub async fn delete_book(&self, auth: &AuthState, id: &str) -> Result<()> {
        self.call(Endpoint::DeleteBook(id.to_string()), Some(auth), None)
            .await
            .map(drop)
    }

    /// `POST /api/orders`
    ///
    /// # Errors
    ///
    /// Token, network and API errors.
    pub async fn place_order(&self, auth: &AuthState, order: &PlaceOrder) -> Result<Option<Order>> {
        self.call(Endpoint::PlaceOrder, Some(auth), Some(Self::encode(order)?))
            .await?
            .into_item()
    }

    /// `GET /api/orders/all` (admin)
    ///
    /// # Errors
    ///
    /// Token, network, API and envelope errors.
    pub async fn all_orders(&self, auth: &AuthState) -> Result<Vec<Order>> {
        self.list(Endpoint::AllOrders, Some(auth)).await
    }

    /// `GET /api/orders/my-orders`
    ///
    /// # Errors
    ///
    /// Token, network, API and envelope errors.
    pub async fn my_orders(&self, auth: &AuthState) -> Result<Vec<Order>> {
        self.list(Endpoint::MyOrders, Some(auth)).await
    }

    /// `GET /api/orders/revenue` (admin)
    ///
    /// # Errors
    ///
    /// Token, network, API and envelope errors.
    pub async fn revenue(&self, auth: &AuthState) -> Result<Revenue> {
        self.call(Endpoint::Revenue, Some(auth), None)
            .await?
            .into_item()?
            .ok_or_else(|| FolioError::MalformedEnvelope("revenue missing from response".to_string()))
    }

    /// `PATCH /api/orders/:id/status`
    ///
    /// # Errors
    ///
    /// Token, network and API errors.
    pub async fn update_order_status(
        &self,
        auth: &AuthState,
        id: &str,
        status: OrderStatus,
    ) -> Result<Option<Order>> {
        self.call(
            Endpoint::UpdateOrderStatus(id.to_string()),
            Some(auth),
            Some(json!({ "status": status })),
        )
        .await?
        .into_item()
    }

    /// `DELETE /api/orders/:id`
    ///
    /// # Errors
    ///
    /// Token, network and API errors.
    pub async fn delete_order(&self, auth: &AuthState, id: &str) -> Result<()> {
        self.call(Endpoint::DeleteOrder(id.to_string()), Some(auth), None)
            .await
            .map(drop)
    }

    /// `GET /api/users/all` (admin)
    ///
    /// # Errors
    ///
    /// Token, network, API and envelope errors.
    pub async fn all_users(&self, auth: &AuthState) -> Result<Vec<User>> {
        self.list(Endpoint::AllUsers, Some(auth)).await
    }

    /// `PATCH /api/users/:id/status`
    ///
    /// # Errors
    ///
    /// Token, network and API errors.
    pub async fn update_user_role(
        &self,
        auth: &AuthState,
        id: &str,
        role: Role,
    ) -> Result<Option<User>> {
        self.call(
            Endpoint::UpdateUserStatus(id.to_string()),
            Some(auth),
            Some(json!({ "role": role })),
        )
        .await?
        .into_item()
    }

    /// `POST /api/users/register`
    ///
    /// # Errors
    ///
    /// Validation errors before sending; API errors after.
    pub async fn register(&self, registration: &Registration) -> Result<Option<User>> {
        registration.validate()?;
        self.call(Endpoint::Register, None, Some(Self::encode(registration)?))
            .await?
            .into_item()
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// API errors (bad credentials) and envelope errors when the response
    /// carries no token.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        self.call(Endpoint::Login, None, Some(Self::encode(credentials)?))
            .await?
            .into_item()?
            .ok_or_else(|| FolioError::MalformedEnvelope("login response has no session".to_string()))
    }
}

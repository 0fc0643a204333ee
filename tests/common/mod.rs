//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use folio::api::{ApiClient, HttpRequest, HttpResponse, Transport};
use folio::domain::{AuthState, Book, Role, Session, User};
use folio::Result;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// A canned reply, or a request that never answers.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Hang,
}

/// In-memory transport: records every request and replays scripted replies
/// in order. Unscripted requests get a `500` with no body.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.push(Reply::Respond(HttpResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.push(Reply::Respond(HttpResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn hang(self) -> Self {
        self.push(Reply::Hang)
    }

    fn push(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        self.sent.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();
        async move {
            match reply {
                Some(Reply::Respond(response)) => Ok(response),
                Some(Reply::Hang) => std::future::pending().await,
                None => Ok(HttpResponse {
                    status: 500,
                    body: String::new(),
                }),
            }
        }
    }
}

pub fn client(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::new(transport.clone())
}

pub fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        author: "Anon".to_string(),
        price: 10.0,
        category: "fiction".to_string(),
        description: "A book worth reading.".to_string(),
        quantity: 3,
        ..Book::default()
    }
}

pub fn books(n: usize) -> Vec<Book> {
    (1..=n)
        .map(|i| book(&format!("b{i}"), &format!("Book {i}")))
        .collect()
}

pub fn book_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "author": "Anon",
        "price": 10.0,
        "category": "fiction",
        "description": "A book worth reading.",
        "quantity": 3
    })
}

pub fn user(id: &str, name: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{name}@example.com").to_lowercase(),
        role,
        created_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        updated_at: None,
    }
}

pub fn signed_in(role: Role) -> AuthState {
    AuthState::Authenticated(Session {
        access_token: "tok-123".to_string(),
        user: user("u0", "Ada", role),
    })
}

pub fn order_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "user": { "_id": "u1", "name": "Bea" },
        "items": [{ "book": "b1", "quantity": 2 }],
        "totalPrice": 20.0,
        "status": status
    })
}

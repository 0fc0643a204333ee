mod common;

use common::{book, book_json, client, order_json, signed_in, ScriptedTransport};
use folio::api::{CancellationToken, Method};
use folio::app::{fetch, try_fetch, FetchOutcome, ListState, NoticeLevel, Operations};
use folio::domain::{AuthState, Book, Cart, Credentials, FolioError, Order, Role};
use folio::storage::{JsonFileStore, MemoryStore, SessionStore, SESSION_KEY};
use serde_json::json;

#[tokio::test]
async fn catalogue_loads_into_list_state() {
    let transport = ScriptedTransport::new().reply(
        200,
        json!({ "data": [book_json("b1", "Dune"), book_json("b2", "Emma")] }),
    );
    let api = client(&transport);
    let mut state: ListState<Book> = ListState::new(10);

    let outcome = fetch(&mut state, api.list_books()).await;

    assert_eq!(outcome, FetchOutcome::Loaded(2));
    assert!(!state.is_loading());
    assert_eq!(state.get("b2").unwrap().title, "Emma");
    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].path, "/api/books");
    assert_eq!(sent[0].bearer, None);
}

#[tokio::test]
async fn non_array_data_leaves_list_empty_with_notice() {
    let transport = ScriptedTransport::new().reply(200, json!({ "data": { "books": [] } }));
    let api = client(&transport);
    let mut state = ListState::with_items(vec![book("old", "Stale")], 10);

    let outcome = fetch(&mut state, api.list_books()).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert!(state.is_empty());
    assert!(state.error().is_some());
    assert_eq!(state.notices()[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn server_error_message_reaches_the_notice() {
    let transport =
        ScriptedTransport::new().reply(503, json!({ "success": false, "message": "Down for maintenance" }));
    let api = client(&transport);
    let mut state: ListState<Book> = ListState::new(10);

    fetch(&mut state, api.list_books()).await;

    assert_eq!(state.error(), Some("Down for maintenance"));
}

#[tokio::test]
async fn cancelled_fetch_keeps_previous_items() {
    let transport = ScriptedTransport::new().hang();
    let api = client(&transport);
    let mut state = ListState::with_items(vec![book("b1", "Kept")], 10);
    state.close();

    let outcome = fetch(&mut state, api.list_books()).await;

    assert_eq!(outcome, FetchOutcome::Cancelled);
    assert_eq!(state.len(), 1);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn authenticated_calls_carry_the_bearer_token() {
    let transport = ScriptedTransport::new().reply(200, json!({ "data": [order_json("o1", "pending")] }));
    let api = client(&transport);
    let auth = signed_in(Role::User);

    let orders: Vec<Order> = api.my_orders(&auth).await.unwrap();

    assert_eq!(orders.len(), 1);
    let sent = transport.sent();
    assert_eq!(sent[0].path, "/api/orders/my-orders");
    assert_eq!(sent[0].bearer.as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn unrecognised_storage_means_no_token_and_no_request() {
    let sessions = SessionStore::new(MemoryStore::with_item("someone-else", "{\"x\":1}"));
    assert_eq!(sessions.access_token(), None);
    let auth = sessions.load();
    assert_eq!(auth, AuthState::Unauthenticated);

    let transport = ScriptedTransport::new();
    let api = client(&transport);
    let err = api.all_orders(&auth).await.unwrap_err();

    assert!(matches!(err, FolioError::TokenNotFound));
    assert_eq!(err.user_message(), "token not found");
    assert!(transport.sent().is_empty());
}

#[test]
fn malformed_session_layers_yield_no_token() {
    for blob in [
        "not json",
        "{}",
        "{\"auth\":\"not json either\"}",
        "{\"auth\":\"{}\"}",
        "{\"auth\":\"{\\\"accessToken\\\":\\\"  \\\"}\"}",
    ] {
        let sessions = SessionStore::new(MemoryStore::with_item(SESSION_KEY, blob));
        assert_eq!(sessions.access_token(), None, "blob {blob}");
        assert_eq!(sessions.load(), AuthState::Unauthenticated);
    }
}

#[tokio::test]
async fn login_persists_a_session_that_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let transport = ScriptedTransport::new().reply(
        200,
        json!({
            "success": true,
            "data": {
                "accessToken": "fresh-token",
                "user": { "_id": "u1", "name": "Bea", "email": "bea@example.com", "role": "user" }
            }
        }),
    );
    let api = client(&transport);

    let session = api
        .login(&Credentials {
            email: "bea@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();
    let mut sessions = SessionStore::new(JsonFileStore::open(path.clone()).unwrap());
    sessions.save(&session).unwrap();
    drop(sessions);

    let reopened = SessionStore::new(JsonFileStore::open(path).unwrap());
    assert_eq!(reopened.access_token().as_deref(), Some("fresh-token"));
    assert_eq!(reopened.load().role(), Some(Role::User));
    assert_eq!(transport.sent()[0].path, "/api/auth/login");
}

#[tokio::test]
async fn bad_credentials_surface_the_server_message() {
    let transport = ScriptedTransport::new().reply(401, json!({ "message": "Invalid email or password" }));
    let api = client(&transport);

    let err = api
        .login(&Credentials {
            email: "bea@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn checkout_sends_cart_lines_and_total() {
    let mut cart = Cart::default();
    cart.add(&book("b1", "Dune"), 2).unwrap();
    let transport = ScriptedTransport::new().reply(201, json!({ "data": order_json("o9", "pending") }));
    let api = client(&transport);
    let auth = signed_in(Role::User);

    let order = Operations::new(&api, &auth)
        .checkout(&cart, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(order.map(|o| o.id), Some("o9".to_string()));
    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(
        sent[0].body,
        Some(json!({ "items": [{ "book": "b1", "quantity": 2 }], "totalPrice": 20.0 }))
    );
}

#[tokio::test]
async fn admins_and_guests_cannot_check_out() {
    let mut cart = Cart::default();
    cart.add(&book("b1", "Dune"), 1).unwrap();
    let transport = ScriptedTransport::new();
    let api = client(&transport);
    let token = CancellationToken::new();

    let admin = signed_in(Role::Admin);
    let err = Operations::new(&api, &admin).checkout(&cart, &token).await.unwrap_err();
    assert!(matches!(err, FolioError::Forbidden(_)));

    let err = Operations::new(&api, &AuthState::Unauthenticated)
        .checkout(&cart, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::TokenNotFound));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn empty_cart_is_rejected_before_sending() {
    let transport = ScriptedTransport::new();
    let api = client(&transport);
    let auth = signed_in(Role::User);

    let err = Operations::new(&api, &auth)
        .checkout(&Cart::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FolioError::Validation(_)));
    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn revenue_accepts_number_or_summary() {
    let transport = ScriptedTransport::new()
        .reply(200, json!({ "data": 1250.5 }))
        .reply(200, json!({ "data": { "totalRevenue": 99.0, "totalOrders": 3 } }));
    let api = client(&transport);
    let auth = signed_in(Role::Admin);

    assert!((api.revenue(&auth).await.unwrap().total() - 1250.5).abs() < f64::EPSILON);
    assert!((api.revenue(&auth).await.unwrap().total() - 99.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn failed_preload_reports_the_error_and_sends_nothing_else() {
    let transport = ScriptedTransport::new().reply(500, json!({ "message": "Orders unavailable" }));
    let api = client(&transport);
    let auth = signed_in(Role::Admin);
    let mut state: ListState<Order> = ListState::new(10);

    let err = try_fetch(&mut state, api.all_orders(&auth)).await.unwrap_err();

    assert_eq!(err.user_message(), "Orders unavailable");
    assert!(!state.is_loading());
    assert!(state.notices().is_empty());
    assert_eq!(transport.sent().len(), 1);
}

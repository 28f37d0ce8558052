#![cfg(feature = "axum")]

use axum_core::{extract::FromRequestParts, response::IntoResponse};
use futures::executor;
use hanko::{BoxError, Error, MemoryStore, TokenGuard};
use http::{Request, StatusCode};

#[test]
fn rejections_are_forbidden() {
    assert_eq!(
        Error::MissingToken.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        Error::InvalidToken.into_response().status(),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn store_failures_are_server_errors() {
    let error = Error::Store(BoxError::from("session backend unreachable"));
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn extract_guard() {
    let store = MemoryStore::new();
    let (mut parts, ()) = Request::builder()
        .extension(TokenGuard::new(store))
        .body(())
        .unwrap()
        .into_parts();

    let mut guard = executor::block_on(TokenGuard::<MemoryStore>::from_request_parts(
        &mut parts,
        &(),
    ))
    .unwrap();
    let token = guard.generate_token().unwrap();
    assert_eq!(guard.tokens().unwrap(), vec![token]);
}

#[test]
fn extract_without_middleware() {
    let (mut parts, ()) = Request::new(()).into_parts();

    let Err(error) = executor::block_on(TokenGuard::<MemoryStore>::from_request_parts(
        &mut parts,
        &(),
    )) else {
        panic!("extracted a guard without the middleware");
    };

    assert!(!error.is_rejection());
    assert_eq!(
        error.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

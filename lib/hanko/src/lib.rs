#![doc = include_str!("../README.md")]

#[macro_use]
extern crate tracing;

pub use self::{
    config::Configuration,
    error::{BoxError, ConfigError, Error, Result},
    future::ResponseFuture,
    guard::{is_protected, TokenGuard},
    layer::CsrfLayer,
    request::{FormParams, FormRequest},
    service::CsrfService,
    store::{MemoryStore, SessionStore, StoreError},
    token::{Token, TokenRef},
};

#[cfg(feature = "axum")]
mod axum;
pub mod config;
mod error;
mod future;
mod guard;
mod layer;
mod request;
mod service;
mod store;
mod token;

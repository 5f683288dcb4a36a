//! # scribe
//!
//! A small article CRUD service: list, fetch, create, edit and delete blog
//! articles, each referencing one tag.
//!
//! ## The contract
//!
//! Every response is a fixed JSON envelope:
//!
//! ```text
//! {"code": 200, "msg": "ok", "data": {...}}
//! ```
//!
//! By default the HTTP status is always `200 OK`. The application `code`
//! carries the outcome, so a client must read it. Set
//! `app.transport-status = "mapped"` to get conventional HTTP statuses
//! instead.
//!
//! ## Layers
//!
//! - [`Router`], [`Server`], [`Request`], [`Response`] — a minimal HTTP layer
//!   on hyper. Radix-tree routing via [`matchit`], graceful shutdown on
//!   SIGTERM / Ctrl-C.
//! - [`Validation`] — collect-all input checks.
//! - [`ArticleService`] — validate, check existence, make one store call.
//! - [`ArticleStore`] — the persistence seam; [`MemoryStore`] implements it.
//! - [`Formatter`] / [`Envelope`] — code → message → JSON.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use scribe::{ArticleService, Formatter, MemoryStore, Server, Tag, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scribe::Error> {
//!     let store = MemoryStore::with_tags([Tag { id: 1, name: "rust".into() }]);
//!     let api = Arc::new(ArticleService::new(store, 10, Formatter::default()));
//!
//!     Server::bind("0.0.0.0:8000")?.serve(routes::router(api)).await
//! }
//! ```

mod articles;
mod code;
mod config;
mod envelope;
mod error;
mod handler;
mod method;
mod model;
mod pagination;
mod request;
mod response;
mod router;
mod server;
mod validation;

pub mod health;
pub mod routes;
pub mod store;

pub use articles::{ArticleForm, ArticlePage, ArticleService};
pub use code::Code;
pub use config::Config;
pub use envelope::{Envelope, Formatter, TransportStatus};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use model::{Article, ArticleFilter, ArticlePatch, ArticleState, NewArticle, Tag};
pub use pagination::offset as page_offset;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_SIZE, Server};
pub use store::{ArticleStore, MemoryStore, StoreError};
pub use validation::{Validation, Violation};

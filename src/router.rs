//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Each handler receives
//! the request and a clone of the router's shared state.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so they chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty router whose handlers all share `state`.
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a `GET` handler for `path`. The other verb methods work the
    /// same way.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or conflicts with an
    /// existing one. Routes are registered at startup, so this is a
    /// programming error.
    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.add(Method::Delete, path, handler)
    }

    fn add(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Routes one buffered request to its handler.
    ///
    /// Unknown verbs and paths registered only under other methods get
    /// `405`; unknown paths get `404`. The server calls this for every
    /// request, and tests can call it directly without a socket.
    pub async fn respond(&self, req: http::Request<Bytes>) -> Response {
        let Ok(method) = Method::try_from(req.method()) else {
            return Response::status(StatusCode::METHOD_NOT_ALLOWED);
        };
        let path = req.uri().path().to_owned();

        match self.lookup(method, &path) {
            Some((handler, params)) => {
                handler.call(Request::new(req, params), self.state.clone()).await
            }
            None if self.routes.values().any(|tree| tree.at(&path).is_ok()) => {
                Response::status(StatusCode::METHOD_NOT_ALLOWED)
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }
}

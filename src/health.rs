//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the store answer? Failure → pulled from load-balancer. |

use std::future::Future;

use http::StatusCode;

use crate::{Request, Response};

/// Router state that can report whether its dependencies are reachable.
pub trait Readiness {
    fn is_ready(&self) -> impl Future<Output = bool> + Send;
}

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. It has no dependencies.
pub async fn liveness<S>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// Readiness probe handler.
///
/// `200 ready` when the state reports ready, `503` otherwise.
pub async fn readiness<S: Readiness>(_req: Request, state: S) -> Response {
    if state.is_ready().await {
        Response::text("ready")
    } else {
        Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .text("not ready")
    }
}

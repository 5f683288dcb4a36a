//! HTTP handlers for the article API.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | Get one | GET | `/api/v1/articles/{id}` |
//! | List | GET | `/api/v1/articles?state=&tagID=&page=` |
//! | Create | POST | `/api/v1/articles` |
//! | Edit | PUT | `/api/v1/articles/{id}` |
//! | Delete | DELETE | `/api/v1/articles/{id}` |
//!
//! Parameters travel in the query string or a form-encoded body.

use std::sync::Arc;

use tracing::warn;

use crate::articles::{ArticleForm, ArticleService};
use crate::envelope::Envelope;
use crate::health::{self, Readiness};
use crate::request::Request;
use crate::router::Router;
use crate::store::ArticleStore;

/// Shared router state.
pub type Api<S> = Arc<ArticleService<S>>;

/// Builds the full route table over `api`.
pub fn router<S: ArticleStore>(api: Api<S>) -> Router<Api<S>> {
    Router::new(api)
        .get("/api/v1/articles", list_articles::<S>)
        .post("/api/v1/articles", add_article::<S>)
        .get("/api/v1/articles/{id}", get_article::<S>)
        .put("/api/v1/articles/{id}", edit_article::<S>)
        .delete("/api/v1/articles/{id}", delete_article::<S>)
        .get("/healthz", health::liveness::<Api<S>>)
        .get("/readyz", health::readiness::<Api<S>>)
}

pub async fn get_article<S: ArticleStore>(req: Request, api: Api<S>) -> Envelope {
    api.formatter().reply(api.get(req.param("id")).await)
}

pub async fn list_articles<S: ArticleStore>(req: Request, api: Api<S>) -> Envelope {
    let form = ArticleForm::from_request(&req);
    api.formatter().reply(api.list(&form, req.input("page")).await)
}

pub async fn add_article<S: ArticleStore>(req: Request, api: Api<S>) -> Envelope {
    let form = ArticleForm::from_request(&req);
    api.formatter().reply(api.create(form).await)
}

pub async fn edit_article<S: ArticleStore>(req: Request, api: Api<S>) -> Envelope {
    let form = ArticleForm::from_request(&req);
    api.formatter().reply(api.edit(req.param("id"), form).await)
}

pub async fn delete_article<S: ArticleStore>(req: Request, api: Api<S>) -> Envelope {
    api.formatter().reply(api.delete(req.param("id")).await)
}

impl<S: ArticleStore> Readiness for Api<S> {
    async fn is_ready(&self) -> bool {
        match self.store().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!("store ping failed: {e}");
                false
            }
        }
    }
}

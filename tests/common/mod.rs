#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use scribe::{
    Article, ArticleFilter, ArticlePatch, ArticleService, ArticleStore, Formatter, MemoryStore,
    NewArticle, Response, Router, StoreError, Tag, TransportStatus, routes,
};
use parking_lot::RwLock;
use serde_json::Value;

/// One [`ArticleStore`] method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Op {
    ArticleExists,
    TagExists,
    Article,
    Articles,
    Count,
    Insert,
    Update,
    Delete,
    Ping,
}

impl Op {
    const ALL: [Op; 9] = [
        Op::ArticleExists,
        Op::TagExists,
        Op::Article,
        Op::Articles,
        Op::Count,
        Op::Insert,
        Op::Update,
        Op::Delete,
        Op::Ping,
    ];

    fn is_write(self) -> bool {
        matches!(self, Op::Insert | Op::Update | Op::Delete)
    }
}

/// Wraps a [`MemoryStore`], counting every call and optionally failing them.
#[derive(Clone, Default)]
pub struct Probe {
    inner: MemoryStore,
    calls: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    failing: Arc<RwLock<HashSet<Op>>>,
}

impl Probe {
    pub fn with_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self { inner: MemoryStore::with_tags(tags), ..Self::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Every subsequent call fails as if the connection dropped.
    pub fn take_down(&self) {
        self.failing.write().extend(Op::ALL);
    }

    /// Subsequent calls to `op` fail; everything else keeps working.
    pub fn fail_on(&self, op: Op) {
        self.failing.write().insert(op);
    }

    /// Counts the call, then fails it if `op` is marked failing.
    fn enter(&self, op: Op) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if op.is_write() {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        if self.failing.read().contains(&op) {
            return Err(StoreError::Unavailable(format!("{op:?} failed: connection reset")));
        }
        Ok(())
    }
}

impl ArticleStore for Probe {
    async fn article_exists(&self, id: u32) -> Result<bool, StoreError> {
        self.enter(Op::ArticleExists)?;
        self.inner.article_exists(id).await
    }

    async fn tag_exists(&self, id: u32) -> Result<bool, StoreError> {
        self.enter(Op::TagExists)?;
        self.inner.tag_exists(id).await
    }

    async fn article(&self, id: u32) -> Result<Option<Article>, StoreError> {
        self.enter(Op::Article)?;
        self.inner.article(id).await
    }

    async fn articles(
        &self,
        filter: ArticleFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        self.enter(Op::Articles)?;
        self.inner.articles(filter, offset, limit).await
    }

    async fn count(&self, filter: ArticleFilter) -> Result<u64, StoreError> {
        self.enter(Op::Count)?;
        self.inner.count(filter).await
    }

    async fn insert(&self, article: NewArticle) -> Result<Article, StoreError> {
        self.enter(Op::Insert)?;
        self.inner.insert(article).await
    }

    async fn update(&self, id: u32, patch: ArticlePatch) -> Result<(), StoreError> {
        self.enter(Op::Update)?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.enter(Op::Delete)?;
        self.inner.delete(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter(Op::Ping)
    }
}

pub struct App {
    pub probe: Probe,
    pub router: Router<routes::Api<Probe>>,
}

impl App {
    pub fn new() -> Self {
        Self::with_mode(TransportStatus::AlwaysOk)
    }

    pub fn with_mode(mode: TransportStatus) -> Self {
        let probe = Probe::with_tags([
            Tag { id: 1, name: "rust".into() },
            Tag { id: 2, name: "go".into() },
        ]);
        let api = Arc::new(ArticleService::new(probe.clone(), 10, Formatter::new(mode)));
        Self { probe, router: routes::router(api) }
    }

    pub async fn send(&self, method: &str, uri: &str) -> Response {
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap();
        self.router.respond(req).await
    }

    pub async fn send_form(&self, method: &str, uri: &str, body: &str) -> Response {
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Bytes::from(body.to_owned()))
            .unwrap();
        self.router.respond(req).await
    }

    /// Sends and decodes the envelope.
    pub async fn call(&self, method: &str, uri: &str) -> Value {
        json(&self.send(method, uri).await)
    }

    /// Creates an article through the API and returns its id.
    pub async fn create(&self, title: &str, tag_id: u32) -> u64 {
        let body = self
            .call(
                "POST",
                &format!(
                    "/api/v1/articles?title={title}&desc=d&content=c&createdBy=alice&tagID={tag_id}"
                ),
            )
            .await;
        assert_eq!(body["code"], 200, "create failed: {body}");
        body["data"]["id"].as_u64().unwrap()
    }
}

pub fn json(res: &Response) -> Value {
    serde_json::from_slice(res.body()).unwrap()
}

//! Persistence seam.
//!
//! The core never talks to a database directly. It calls [`ArticleStore`],
//! one statement per call, no transactions. "Not found" is a value
//! (`Ok(false)` / `Ok(None)`); `Err` always means the backend itself failed.

use std::future::Future;

use crate::model::{Article, ArticleFilter, ArticlePatch, NewArticle};

mod memory;

pub use memory::MemoryStore;

/// A persistence-layer failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("article {0} not found")]
    MissingArticle(u32),
}

/// The repository operations the article core depends on.
///
/// Implementations must be cheap to share across concurrent requests; the
/// core holds one instance for the process lifetime.
pub trait ArticleStore: Send + Sync + 'static {
    fn article_exists(&self, id: u32) -> impl Future<Output = Result<bool, StoreError>> + Send;

    fn tag_exists(&self, id: u32) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Fetches one article with its tag joined.
    fn article(&self, id: u32) -> impl Future<Output = Result<Option<Article>, StoreError>> + Send;

    /// Lists matching articles in primary-key order.
    fn articles(
        &self,
        filter: ArticleFilter,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Article>, StoreError>> + Send;

    fn count(&self, filter: ArticleFilter) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Inserts and returns the stored row, id assigned.
    fn insert(
        &self,
        article: NewArticle,
    ) -> impl Future<Output = Result<Article, StoreError>> + Send;

    fn update(
        &self,
        id: u32,
        patch: ArticlePatch,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, id: u32) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Readiness probe.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

//! In-process [`ArticleStore`] backed by ordered maps.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{ArticleStore, StoreError};
use crate::model::{Article, ArticleFilter, ArticlePatch, NewArticle, Tag};

#[derive(Default)]
struct Tables {
    articles: BTreeMap<u32, Article>,
    tags: BTreeMap<u32, Tag>,
    last_id: u32,
}

impl Tables {
    fn joined(&self, article: &Article) -> Article {
        let mut out = article.clone();
        out.tag = self.tags.get(&article.tag_id).cloned();
        out
    }
}

/// A cloneable handle to shared in-memory tables.
///
/// Rows live in `BTreeMap`s keyed by id, so listing order is primary-key
/// order. Ids are never reused after a delete.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with `tags` preloaded.
    pub fn with_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        let store = Self::new();
        for tag in tags {
            store.put_tag(tag);
        }
        store
    }

    /// Inserts or replaces a tag.
    pub fn put_tag(&self, tag: Tag) {
        self.tables.write().tags.insert(tag.id, tag);
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl ArticleStore for MemoryStore {
    async fn article_exists(&self, id: u32) -> Result<bool, StoreError> {
        Ok(self.tables.read().articles.contains_key(&id))
    }

    async fn tag_exists(&self, id: u32) -> Result<bool, StoreError> {
        Ok(self.tables.read().tags.contains_key(&id))
    }

    async fn article(&self, id: u32) -> Result<Option<Article>, StoreError> {
        let tables = self.tables.read();
        Ok(tables.articles.get(&id).map(|a| tables.joined(a)))
    }

    async fn articles(
        &self,
        filter: ArticleFilter,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        let tables = self.tables.read();
        Ok(tables
            .articles
            .values()
            .filter(|a| filter.matches(a))
            .skip(offset)
            .take(limit)
            .map(|a| tables.joined(a))
            .collect())
    }

    async fn count(&self, filter: ArticleFilter) -> Result<u64, StoreError> {
        let tables = self.tables.read();
        Ok(tables.articles.values().filter(|a| filter.matches(a)).count() as u64)
    }

    async fn insert(&self, new: NewArticle) -> Result<Article, StoreError> {
        let mut tables = self.tables.write();
        let id = tables
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable("article id space exhausted".into()))?;
        tables.last_id = id;

        let article = Article {
            id,
            tag_id: new.tag_id,
            tag: None,
            title: new.title,
            desc: new.desc,
            content: new.content,
            created_by: new.created_by,
            modified_by: String::new(),
            state: new.state,
            created_on: now(),
            modified_on: 0,
        };
        let out = tables.joined(&article);
        tables.articles.insert(id, article);
        Ok(out)
    }

    async fn update(&self, id: u32, patch: ArticlePatch) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let article = tables.articles.get_mut(&id).ok_or(StoreError::MissingArticle(id))?;
        patch.apply(article, now());
        Ok(())
    }

    async fn delete(&self, id: u32) -> Result<(), StoreError> {
        self.tables.write().articles.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

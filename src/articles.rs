//! Article request validation and dispatch.
//!
//! Every operation follows the same shape: validate all inputs, run the
//! existence checks the write depends on, make one store call, and hand a
//! [`Code`] (or the data) back to the formatter. A rejected request never
//! reaches the store.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::code::Code;
use crate::envelope::Formatter;
use crate::model::{Article, ArticleFilter, ArticlePatch, ArticleState, NewArticle};
use crate::pagination;
use crate::request::Request;
use crate::store::ArticleStore;
use crate::validation::Validation;

pub const TITLE_MAX: usize = 100;
pub const DESC_MAX: usize = 255;
pub const CONTENT_MAX: usize = 65535;
pub const AUTHOR_MAX: usize = 100;

const ID_MESSAGE: &str = "ID must be greater than 0";
const TAG_ID_MESSAGE: &str = "tag ID must be greater than 0";
const STATE_MESSAGE: &str = "state must be 0 or 1";
const TITLE_TOO_LONG: &str = "title must be at most 100 characters";
const DESC_TOO_LONG: &str = "description must be at most 255 characters";
const CONTENT_TOO_LONG: &str = "content must be at most 65535 characters";
const CREATOR_TOO_LONG: &str = "creator must be at most 100 characters";
const MODIFIER_TOO_LONG: &str = "modifier must be at most 100 characters";

/// Raw article inputs of one request, before validation.
///
/// `None` means the parameter was absent or empty.
#[derive(Clone, Debug, Default)]
pub struct ArticleForm {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub modified_by: Option<String>,
    pub state: Option<String>,
    pub tag_id: Option<String>,
}

impl ArticleForm {
    pub fn from_request(req: &Request) -> Self {
        let input = |key: &str| req.input(key).map(str::to_owned);
        Self {
            title: input("title"),
            desc: input("desc"),
            content: input("content"),
            created_by: input("createdBy"),
            modified_by: input("modifiedBy"),
            state: input("state"),
            tag_id: input("tagID"),
        }
    }

    pub fn validate_filter(&self) -> Result<ArticleFilter, Validation> {
        let mut valid = Validation::new();
        let state = optional_state(&mut valid, self.state.as_deref());
        let tag_id =
            positive_id(&mut valid, "tagID", self.tag_id.as_deref(), false, TAG_ID_MESSAGE);
        if valid.is_success() {
            Ok(ArticleFilter { state, tag_id })
        } else {
            Err(valid)
        }
    }

    pub fn validate_create(self) -> Result<NewArticle, Validation> {
        let mut valid = Validation::new();
        valid.required("title", self.title.as_deref(), "title is required");
        valid.max_size("title", self.title.as_deref(), TITLE_MAX, TITLE_TOO_LONG);
        valid.required("desc", self.desc.as_deref(), "description is required");
        valid.max_size("desc", self.desc.as_deref(), DESC_MAX, DESC_TOO_LONG);
        valid.required("content", self.content.as_deref(), "content is required");
        valid.max_size("content", self.content.as_deref(), CONTENT_MAX, CONTENT_TOO_LONG);
        valid.required("createdBy", self.created_by.as_deref(), "creator is required");
        valid.max_size("createdBy", self.created_by.as_deref(), AUTHOR_MAX, CREATOR_TOO_LONG);
        let state = optional_state(&mut valid, self.state.as_deref()).unwrap_or_default();
        let tag_id =
            positive_id(&mut valid, "tagID", self.tag_id.as_deref(), true, TAG_ID_MESSAGE);

        match tag_id {
            Some(tag_id) if valid.is_success() => Ok(NewArticle {
                tag_id,
                title: self.title.unwrap_or_default(),
                desc: self.desc.unwrap_or_default(),
                content: self.content.unwrap_or_default(),
                created_by: self.created_by.unwrap_or_default(),
                state,
            }),
            _ => Err(valid),
        }
    }

    pub fn validate_edit(self, id: Option<&str>) -> Result<(u32, ArticlePatch), Validation> {
        let mut valid = Validation::new();
        let state = optional_state(&mut valid, self.state.as_deref());
        let id = positive_id(&mut valid, "id", id, true, ID_MESSAGE);
        valid.max_size("title", self.title.as_deref(), TITLE_MAX, TITLE_TOO_LONG);
        valid.max_size("desc", self.desc.as_deref(), DESC_MAX, DESC_TOO_LONG);
        valid.max_size("content", self.content.as_deref(), CONTENT_MAX, CONTENT_TOO_LONG);
        valid.required("modifiedBy", self.modified_by.as_deref(), "modifier is required");
        valid.max_size("modifiedBy", self.modified_by.as_deref(), AUTHOR_MAX, MODIFIER_TOO_LONG);
        let tag_id =
            positive_id(&mut valid, "tagID", self.tag_id.as_deref(), false, TAG_ID_MESSAGE);

        match id {
            Some(id) if valid.is_success() => Ok((id, ArticlePatch {
                tag_id,
                title: self.title,
                desc: self.desc,
                content: self.content,
                state,
                modified_by: self.modified_by.unwrap_or_default(),
            })),
            _ => Err(valid),
        }
    }
}

/// Validates a path id on its own.
pub fn validate_id(raw: Option<&str>) -> Result<u32, Validation> {
    let mut valid = Validation::new();
    positive_id(&mut valid, "id", raw, true, ID_MESSAGE).ok_or(valid)
}

/// An integer ≥ 1 that fits an id. Absence is a violation only if `required`.
fn positive_id(
    valid: &mut Validation,
    field: &'static str,
    raw: Option<&str>,
    required: bool,
    message: &'static str,
) -> Option<u32> {
    if raw.is_none() {
        if required {
            valid.record(field, message);
        }
        return None;
    }
    let value = valid.integer(field, raw)?;
    if !valid.min(field, value, 1, message) {
        return None;
    }
    match u32::try_from(value) {
        Ok(id) => Some(id),
        Err(_) => {
            valid.record(field, format!("{field} is out of range"));
            None
        }
    }
}

fn optional_state(valid: &mut Validation, raw: Option<&str>) -> Option<ArticleState> {
    let value = valid.integer("state", raw)?;
    if !valid.range("state", value, 0, 1, STATE_MESSAGE) {
        return None;
    }
    ArticleState::try_from(value).ok()
}

fn rejected(valid: Validation) -> Code {
    valid.log();
    Code::InvalidParams
}

/// `data` of a successful list call.
#[derive(Debug, Serialize)]
pub struct ArticlePage {
    pub lists: Vec<Article>,
    pub total: u64,
}

/// The article operations over a store.
pub struct ArticleService<S> {
    store: S,
    page_size: u32,
    formatter: Formatter,
}

impl<S: ArticleStore> ArticleService<S> {
    pub fn new(store: S, page_size: u32, formatter: Formatter) -> Self {
        Self { store, page_size, formatter }
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn formatter(&self) -> Formatter { self.formatter }

    pub async fn get(&self, id: Option<&str>) -> Result<Article, Code> {
        let id = validate_id(id).map_err(rejected)?;
        self.ensure_article(id).await?;

        match self.store.article(id).await {
            Ok(Some(article)) => Ok(article),
            Ok(None) => Err(Code::ErrorNotExistArticle),
            Err(e) => {
                error!(article_id = id, "get article failed: {e}");
                Err(Code::ErrorGetArticleFail)
            }
        }
    }

    pub async fn list(&self, form: &ArticleForm, page: Option<&str>) -> Result<ArticlePage, Code> {
        let filter = form.validate_filter().map_err(rejected)?;
        let offset = pagination::offset(page, self.page_size);

        let lists = self.store
            .articles(filter, offset, self.page_size as usize)
            .await
            .map_err(|e| {
                error!(?filter, offset, "list articles failed: {e}");
                Code::ErrorGetArticlesFail
            })?;
        let total = self.store.count(filter).await.map_err(|e| {
            error!(?filter, "count articles failed: {e}");
            Code::ErrorCountArticleFail
        })?;

        Ok(ArticlePage { lists, total })
    }

    pub async fn create(&self, form: ArticleForm) -> Result<Article, Code> {
        let new = form.validate_create().map_err(rejected)?;
        self.ensure_tag(new.tag_id).await?;

        self.store.insert(new).await.map_err(|e| {
            error!("add article failed: {e}");
            Code::ErrorAddArticleFail
        })
    }

    pub async fn edit(
        &self,
        id: Option<&str>,
        form: ArticleForm,
    ) -> Result<Map<String, Value>, Code> {
        let (id, patch) = form.validate_edit(id).map_err(rejected)?;
        self.ensure_article(id).await?;
        if let Some(tag_id) = patch.tag_id {
            self.ensure_tag(tag_id).await?;
        }

        self.store.update(id, patch).await.map_err(|e| {
            error!(article_id = id, "edit article failed: {e}");
            Code::ErrorEditArticleFail
        })?;
        Ok(Map::new())
    }

    pub async fn delete(&self, id: Option<&str>) -> Result<Map<String, Value>, Code> {
        let id = validate_id(id).map_err(rejected)?;
        self.ensure_article(id).await?;

        self.store.delete(id).await.map_err(|e| {
            error!(article_id = id, "delete article failed: {e}");
            Code::ErrorDeleteArticleFail
        })?;
        Ok(Map::new())
    }

    /// A failed lookup is reported as a check failure, not as "does not exist".
    async fn ensure_article(&self, id: u32) -> Result<(), Code> {
        match self.store.article_exists(id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(article_id = id, "article does not exist");
                Err(Code::ErrorNotExistArticle)
            }
            Err(e) => {
                error!(article_id = id, "article existence check failed: {e}");
                Err(Code::ErrorCheckExistArticleFail)
            }
        }
    }

    async fn ensure_tag(&self, id: u32) -> Result<(), Code> {
        match self.store.tag_exists(id).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(tag_id = id, "tag does not exist");
                Err(Code::ErrorNotExistTag)
            }
            Err(e) => {
                error!(tag_id = id, "tag existence check failed: {e}");
                Err(Code::ErrorExistTagFail)
            }
        }
    }
}

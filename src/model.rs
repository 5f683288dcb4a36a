//! Article and tag entities.

use serde::{Deserialize, Serialize};

/// An article category. Articles reference exactly one tag.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub name: String,
}

/// Publication state. Serialized as `0` or `1`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "u8")]
pub enum ArticleState {
    #[default]
    Draft,
    Published,
}

impl From<ArticleState> for u8 {
    fn from(s: ArticleState) -> u8 {
        match s {
            ArticleState::Draft     => 0,
            ArticleState::Published => 1,
        }
    }
}

impl TryFrom<i64> for ArticleState {
    type Error = ();

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Published),
            _ => Err(()),
        }
    }
}

/// A stored article. `tag` is joined in on reads.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Article {
    pub id: u32,
    pub tag_id: u32,
    pub tag: Option<Tag>,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub created_by: String,
    pub modified_by: String,
    pub state: ArticleState,
    /// Unix seconds.
    pub created_on: i64,
    /// Unix seconds, `0` until the first edit.
    pub modified_on: i64,
}

/// Fields of an article about to be inserted. The id is assigned by the store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewArticle {
    pub tag_id: u32,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub created_by: String,
    pub state: ArticleState,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArticlePatch {
    pub tag_id: Option<u32>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub content: Option<String>,
    pub state: Option<ArticleState>,
    pub modified_by: String,
}

impl ArticlePatch {
    pub(crate) fn apply(self, article: &mut Article, now: i64) {
        if let Some(tag_id) = self.tag_id {
            article.tag_id = tag_id;
        }
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(desc) = self.desc {
            article.desc = desc;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(state) = self.state {
            article.state = state;
        }
        article.modified_by = self.modified_by;
        article.modified_on = now;
    }
}

/// Conjunctive list filter. An absent field does not constrain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArticleFilter {
    pub state: Option<ArticleState>,
    pub tag_id: Option<u32>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        self.state.is_none_or(|s| s == article.state)
            && self.tag_id.is_none_or(|t| t == article.tag_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: 1,
            tag_id: 1,
            tag: None,
            title: "Hello".into(),
            desc: "World".into(),
            content: "Body".into(),
            created_by: "alice".into(),
            modified_by: String::new(),
            state: ArticleState::Draft,
            created_on: 10,
            modified_on: 0,
        }
    }

    #[test]
    fn patch_touches_only_supplied_fields() {
        let mut a = article();
        let patch = ArticlePatch {
            title: Some("Hi".into()),
            modified_by: "bob".into(),
            ..ArticlePatch::default()
        };
        patch.apply(&mut a, 20);

        assert_eq!(a.title, "Hi");
        assert_eq!(a.desc, "World");
        assert_eq!(a.content, "Body");
        assert_eq!(a.tag_id, 1);
        assert_eq!(a.state, ArticleState::Draft);
        assert_eq!(a.modified_by, "bob");
        assert_eq!(a.modified_on, 20);
    }

    #[test]
    fn filter_is_conjunctive() {
        let a = article();
        assert!(ArticleFilter::default().matches(&a));
        assert!(ArticleFilter { tag_id: Some(1), state: Some(ArticleState::Draft) }.matches(&a));
        let published = ArticleFilter { tag_id: Some(1), state: Some(ArticleState::Published) };
        assert!(!published.matches(&a));
        assert!(!ArticleFilter { tag_id: Some(2), state: None }.matches(&a));
    }

    #[test]
    fn state_serializes_as_integer() {
        let json = serde_json::to_value(article()).unwrap();
        assert_eq!(json["state"], 0);
        assert_eq!(json["created_by"], "alice");
        assert_eq!(ArticleState::try_from(1), Ok(ArticleState::Published));
        assert_eq!(ArticleState::try_from(2), Err(()));
    }
}

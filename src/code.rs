//! Application result codes.
//!
//! Every response envelope carries one of these in its `code` field. The
//! numeric values and their meaning are part of the wire contract with
//! existing clients:
//!
//! ```text
//! { "code": 10011, "msg": "article does not exist", "data": null }
//! ```
//!
//! The HTTP status a code maps to is only used when the formatter runs in
//! [`TransportStatus::Mapped`](crate::TransportStatus::Mapped) mode.

use http::StatusCode;

/// Business-level outcome of one request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Code {
    Success,                    // 200
    Error,                      // 500
    InvalidParams,              // 400

    // ── Tags ──────────────────────────────────────────────────────────────────
    ErrorExistTagFail,          // 10002
    ErrorNotExistTag,           // 10003

    // ── Articles ──────────────────────────────────────────────────────────────
    ErrorNotExistArticle,       // 10011
    ErrorCheckExistArticleFail, // 10012
    ErrorAddArticleFail,        // 10013
    ErrorDeleteArticleFail,     // 10014
    ErrorEditArticleFail,       // 10015
    ErrorCountArticleFail,      // 10016
    ErrorGetArticlesFail,       // 10017
    ErrorGetArticleFail,        // 10018
}

impl Code {
    /// Human-readable message emitted as the envelope's `msg`.
    pub fn message(self) -> &'static str {
        match self {
            Self::Success                    => "ok",
            Self::Error                      => "fail",
            Self::InvalidParams              => "invalid request parameters",
            Self::ErrorExistTagFail          => "failed to check whether the tag exists",
            Self::ErrorNotExistTag           => "tag does not exist",
            Self::ErrorNotExistArticle       => "article does not exist",
            Self::ErrorCheckExistArticleFail => "failed to check whether the article exists",
            Self::ErrorAddArticleFail        => "failed to add the article",
            Self::ErrorDeleteArticleFail     => "failed to delete the article",
            Self::ErrorEditArticleFail       => "failed to edit the article",
            Self::ErrorCountArticleFail      => "failed to count articles",
            Self::ErrorGetArticlesFail       => "failed to list articles",
            Self::ErrorGetArticleFail        => "failed to get the article",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// The HTTP status this outcome maps to when transport statuses are not
    /// pinned to 200.
    pub fn transport_status(self) -> StatusCode {
        match self {
            Self::Success                    => StatusCode::OK,
            Self::InvalidParams              => StatusCode::BAD_REQUEST,
            Self::ErrorNotExistTag
            | Self::ErrorNotExistArticle     => StatusCode::NOT_FOUND,
            Self::Error
            | Self::ErrorExistTagFail
            | Self::ErrorCheckExistArticleFail
            | Self::ErrorAddArticleFail
            | Self::ErrorDeleteArticleFail
            | Self::ErrorEditArticleFail
            | Self::ErrorCountArticleFail
            | Self::ErrorGetArticlesFail
            | Self::ErrorGetArticleFail      => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Code> for u32 {
    fn from(c: Code) -> u32 {
        match c {
            Code::Success                    => 200,
            Code::Error                      => 500,
            Code::InvalidParams              => 400,
            Code::ErrorExistTagFail          => 10002,
            Code::ErrorNotExistTag           => 10003,
            Code::ErrorNotExistArticle       => 10011,
            Code::ErrorCheckExistArticleFail => 10012,
            Code::ErrorAddArticleFail        => 10013,
            Code::ErrorDeleteArticleFail     => 10014,
            Code::ErrorEditArticleFail       => 10015,
            Code::ErrorCountArticleFail      => 10016,
            Code::ErrorGetArticlesFail       => 10017,
            Code::ErrorGetArticleFail        => 10018,
        }
    }
}

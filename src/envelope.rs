//! The fixed JSON response envelope.
//!
//! Every API response has the same shape:
//!
//! ```text
//! {"code": 200, "msg": "ok", "data": {...}}
//! ```
//!
//! By default the transport status is always `200 OK`, whatever the outcome.
//! Clients must read `code` to learn whether the operation succeeded; a 200
//! on the wire says nothing about the operation. [`TransportStatus::Mapped`]
//! switches to conventional HTTP statuses for deployments without legacy
//! clients.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::code::Code;
use crate::response::{IntoResponse, Response};

/// How application codes map onto the HTTP status line.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum TransportStatus {
    /// Always `200 OK`; the outcome lives only in the body.
    #[default]
    AlwaysOk,
    /// Use [`Code::transport_status`].
    Mapped,
}

/// A formatted API response.
#[derive(Debug, Serialize)]
pub struct Envelope {
    code: u32,
    msg: &'static str,
    data: Value,
    #[serde(skip)]
    status: StatusCode,
}

impl Envelope {
    pub fn code(&self) -> u32 { self.code }
    pub fn msg(&self) -> &str { self.msg }
    pub fn data(&self) -> &Value { &self.data }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self) {
            Ok(bytes) => Response::builder().status(self.status).json(bytes),
            Err(e) => {
                error!("envelope serialization failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

/// Looks up the message for a code and picks the transport status.
#[derive(Clone, Copy, Debug, Default)]
pub struct Formatter {
    mode: TransportStatus,
}

impl Formatter {
    pub fn new(mode: TransportStatus) -> Self {
        Self { mode }
    }

    pub fn envelope(&self, code: Code, data: Value) -> Envelope {
        let status = match self.mode {
            TransportStatus::AlwaysOk => StatusCode::OK,
            TransportStatus::Mapped => code.transport_status(),
        };
        Envelope { code: code.into(), msg: code.message(), data, status }
    }

    /// Success carries the serialized value; failure carries `null` data.
    pub fn reply<T: Serialize>(&self, result: Result<T, Code>) -> Envelope {
        match result {
            Ok(data) => match serde_json::to_value(data) {
                Ok(data) => self.envelope(Code::Success, data),
                Err(e) => {
                    error!("response data serialization failed: {e}");
                    self.envelope(Code::Error, Value::Null)
                }
            },
            Err(code) => self.envelope(code, Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn failures_still_travel_as_200_by_default() {
        let res = Formatter::default()
            .reply::<()>(Err(Code::ErrorNotExistArticle))
            .into_response();

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(
            body(&res),
            json!({"code": 10011, "msg": "article does not exist", "data": null})
        );
    }

    #[test]
    fn mapped_mode_uses_http_statuses() {
        let f = Formatter::new(TransportStatus::Mapped);
        let rejected = f.reply::<()>(Err(Code::InvalidParams)).into_response();
        assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(f.reply(Ok(json!({}))).into_response().status_code(), StatusCode::OK);
    }

    #[test]
    fn success_wraps_data() {
        let env = Formatter::default().reply(Ok(json!({"total": 0, "lists": []})));
        assert_eq!(env.code(), 200);
        assert_eq!(env.msg(), "ok");
        assert_eq!(env.data()["total"], 0);
    }
}

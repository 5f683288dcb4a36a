//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method};

/// An incoming HTTP request with its body fully buffered.
///
/// Inputs are gathered from the query string and, for
/// `application/x-www-form-urlencoded` bodies, from the body as well. Query
/// values come first, so [`Request::input`] prefers them. Empty values are
/// dropped on the way in: `?title=` is the same as leaving `title` out.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
    inputs: Vec<(String, String)>,
}

impl Request {
    pub(crate) fn new(req: http::Request<Bytes>, params: HashMap<String, String>) -> Self {
        let (parts, body) = req.into_parts();

        let mut inputs = Vec::new();
        if let Some(query) = parts.uri.query() {
            inputs.extend(parse_pairs(query.as_bytes()));
        }
        let is_form = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
        if is_form {
            inputs.extend(parse_pairs(&body));
        }

        Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
            params,
            inputs,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Header lookup. Header names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/articles/{id}`, `req.param("id")` on `/articles/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first non-empty query or form value named `key`.
    pub fn input(&self, key: &str) -> Option<&str> {
        self.inputs.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_pairs(raw: &[u8]) -> impl Iterator<Item = (String, String)> + '_ {
    url::form_urlencoded::parse(raw)
        .into_owned()
        .filter(|(_, v)| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str, content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = http::Request::builder().method("POST").uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        Request::new(builder.body(Bytes::from_static(body.as_bytes())).unwrap(), HashMap::new())
    }

    #[test]
    fn query_values_are_decoded_and_empty_ones_dropped() {
        let req = request("/a?title=Hello%20World&desc=&state=1", None, "");
        assert_eq!(req.path(), "/a");
        assert_eq!(req.input("title"), Some("Hello World"));
        assert_eq!(req.input("desc"), None);
        assert_eq!(req.input("state"), Some("1"));
    }

    #[test]
    fn form_body_is_read_after_the_query() {
        let req = request(
            "/a?title=fromQuery",
            Some("application/x-www-form-urlencoded; charset=utf-8"),
            "title=fromBody&content=x+y",
        );
        assert_eq!(req.input("title"), Some("fromQuery"));
        assert_eq!(req.input("content"), Some("x y"));
    }

    #[test]
    fn non_form_bodies_are_not_parsed() {
        let req = request("/a", Some("application/json"), "title=nope");
        assert_eq!(req.input("title"), None);
        assert_eq!(req.body(), b"title=nope");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
    }
}

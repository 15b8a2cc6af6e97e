use super::HttpTransport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use url::Url;

/// A canned reply for every request whose URL contains the route pattern.
#[derive(Debug, Clone)]
pub enum Canned {
    Json(Value),
    Bytes(Vec<u8>),
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// In-memory transport that records each request and answers from a route table.
///
/// Routes are matched in insertion order by substring; an unmatched request
/// fails with a 404 status.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, Canned)>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, pattern: &str, canned: Canned) -> Self {
        self.routes.push((pattern.to_owned(), canned));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn called(&self, pattern: &str) -> bool {
        self.calls().iter().any(|c| c.url.contains(pattern))
    }

    fn respond(&self, method: &'static str, url: &Url, params: &[(&str, String)]) -> Result<Canned> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Call {
                method,
                url: url.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });
        }
        let canned = self
            .routes
            .iter()
            .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
            .map(|(_, canned)| canned.clone())
            .unwrap_or(Canned::Status(404));
        match canned {
            Canned::Status(status) if !(200..300).contains(&status) => Err(Error::Status {
                url: url.to_string(),
                status,
            }),
            other => Ok(other),
        }
    }

    fn respond_json(&self, method: &'static str, url: &Url, params: &[(&str, String)]) -> Result<Value> {
        match self.respond(method, url, params)? {
            Canned::Json(value) => Ok(value),
            Canned::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Canned::Status(_) => Ok(Value::Null),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get_json(&self, url: &Url, query: &[(&str, String)]) -> Result<Value> {
        self.respond_json("GET", url, query)
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        match self.respond("GET", url, &[])? {
            Canned::Bytes(bytes) => Ok(bytes),
            Canned::Json(value) => Ok(serde_json::to_vec(&value)?),
            Canned::Status(_) => Ok(Vec::new()),
        }
    }

    async fn post_form(&self, url: &Url, form: &[(&str, String)]) -> Result<Value> {
        self.respond_json("POST", url, form)
    }

    async fn post_file(
        &self,
        url: &Url,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let params = [
            (field, file_name.to_owned()),
            ("len", bytes.len().to_string()),
        ];
        self.respond_json("POST", url, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn routes_in_order_and_records() {
        let mock = MockTransport::new()
            .route("/1/info.0.json", Canned::Json(json!({"num": 1})))
            .route("info.0.json", Canned::Json(json!({"num": 2})))
            .route("broken", Canned::Status(500));

        let first = Url::parse("https://xkcd.com/1/info.0.json").unwrap();
        let latest = Url::parse("https://xkcd.com/info.0.json").unwrap();
        let broken = Url::parse("https://xkcd.com/broken").unwrap();

        assert_eq!(json!({"num": 1}), mock.get_json(&first, &[]).await.unwrap());
        assert_eq!(json!({"num": 2}), mock.get_json(&latest, &[]).await.unwrap());
        let err = mock.get_bytes(&broken).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));

        assert_eq!(3, mock.calls().len());
        assert!(mock.called("broken"));
        assert!(!mock.called("nowhere"));
    }

    #[tokio::test]
    async fn unmatched_is_not_found() {
        let mock = MockTransport::new();
        let url = Url::parse("https://example.com/").unwrap();
        let err = mock.get_json(&url, &[]).await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }
}

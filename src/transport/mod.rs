//! HTTP access for every remote call the crate makes.
//!
//! The archive client, the image fetcher and the wall publisher only talk to
//! the network through [`HttpTransport`], so a run can be driven against a
//! recording mock in tests.

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::ReqwestTransport;
#[cfg(test)]
pub use mock::{Canned, MockTransport};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` with `query` appended and decode the body as JSON.
    async fn get_json(&self, url: &Url, query: &[(&str, String)]) -> Result<Value>;

    /// GET `url` and return the raw body.
    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>>;

    /// POST `form` as `application/x-www-form-urlencoded` and decode the body as JSON.
    async fn post_form(&self, url: &Url, form: &[(&str, String)]) -> Result<Value>;

    /// POST `bytes` as a single multipart file field and decode the body as JSON.
    async fn post_file(
        &self,
        url: &Url,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value>;
}

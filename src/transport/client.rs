use super::HttpTransport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{multipart, Client, Response};
use serde_json::Value;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            url: without_query(response.url()),
            status: status.as_u16(),
        })
    }
}

/// `url` with the query dropped; VK requests carry the access token there.
fn without_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

async fn decode_json(response: Response) -> Result<Value> {
    let body = check_status(response)?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &Url, query: &[(&str, String)]) -> Result<Value> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).query(query).send().await?;
        decode_json(response).await
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        // Images are small enough to buffer whole.
        let bytes = check_status(response)?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn post_form(&self, url: &Url, form: &[(&str, String)]) -> Result<Value> {
        debug!("POST {}", url);
        let response = self.client.post(url.clone()).form(form).send().await?;
        decode_json(response).await
    }

    async fn post_file(
        &self,
        url: &Url,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        debug!("POST {} ({} bytes as `{}`)", url, bytes.len(), field);
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part(field.to_owned(), part);
        let response = self.client.post(url.clone()).multipart(form).send().await?;
        decode_json(response).await
    }
}

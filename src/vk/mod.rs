//! Posting a photo to a VK community wall.
//!
//! VK needs four calls for one photo post: ask for an upload host, push the
//! file to it, save the upload as a wall photo and finally create the post
//! that references it. Each step returns the inputs of the next one; any
//! failure stops the sequence.

pub mod response;

pub use response::{Attachment, UploadSession};

use crate::configuration::Settings;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;
use log::{debug, info};
use response::{Envelope, PostCreated, SavedPhoto, UploadServer, UploadedPhoto};
use serde::de::DeserializeOwned;
use std::path::Path;
use url::Url;

const UPLOAD_FIELD: &str = "photo";

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub post_id: i64,
    pub attachment: Attachment,
}

pub struct WallPublisher<'a, T: HttpTransport> {
    transport: &'a T,
    api_url: &'a Url,
    access_token: &'a str,
    api_version: &'a str,
    group_id: u64,
}

impl<'a, T: HttpTransport> WallPublisher<'a, T> {
    pub fn new(transport: &'a T, settings: &'a Settings) -> Self {
        Self {
            transport,
            api_url: &settings.vk_api_url,
            access_token: &settings.access_token,
            api_version: &settings.api_version,
            group_id: settings.group_id,
        }
    }

    /// Uploads `photo_path` and posts it on the group wall with `message`.
    pub async fn publish_photo(&self, photo_path: &Path, message: &str) -> Result<Published> {
        let server = self.request_upload_endpoint().await?;
        let session = self.upload_binary(&server.upload_url, photo_path).await?;
        let attachment = self.register_asset(&session).await?;
        let post_id = self.publish_post(&attachment, message).await?;
        Ok(Published {
            post_id,
            attachment,
        })
    }

    pub async fn request_upload_endpoint(&self) -> Result<UploadServer> {
        let url = self.method_url("photos.getWallUploadServer")?;
        let params = self.base_params(vec![("group_id", self.group_id.to_string())]);
        let server: UploadServer = unwrap_envelope(
            "photos.getWallUploadServer",
            self.transport.get_json(&url, &params).await?,
        )?;
        debug!(
            "Upload host {} (album {:?}, user {:?})",
            server.upload_url, server.album_id, server.user_id
        );
        info!("Got upload server");
        Ok(server)
    }

    pub async fn upload_binary(&self, upload_url: &str, photo_path: &Path) -> Result<UploadSession> {
        let url = Url::parse(upload_url)
            .map_err(|e| Error::Data(format!("bad upload url {}: {}", upload_url, e)))?;
        let file_name = photo_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Data(format!("bad photo path {}", photo_path.display())))?;
        let bytes = tokio::fs::read(photo_path).await?;

        let uploaded: UploadedPhoto = serde_json::from_value(
            self.transport
                .post_file(&url, UPLOAD_FIELD, file_name, bytes)
                .await?,
        )?;
        // An empty list means the host accepted the request but kept no file.
        if uploaded.photo.is_empty() || uploaded.photo == "[]" {
            return Err(Error::Data(format!(
                "image wasn't uploaded, check the `{}` field and the file contents",
                UPLOAD_FIELD
            )));
        }
        info!("Uploaded {} to server {}", file_name, uploaded.server);
        Ok(UploadSession {
            server_id: uploaded.server,
            photo_token: uploaded.photo,
            upload_hash: uploaded.hash,
        })
    }

    pub async fn register_asset(&self, session: &UploadSession) -> Result<Attachment> {
        let url = self.method_url("photos.saveWallPhoto")?;
        let form = self.base_params(vec![
            ("group_id", self.group_id.to_string()),
            ("server", session.server_id.to_string()),
            ("photo", session.photo_token.clone()),
            ("hash", session.upload_hash.clone()),
        ]);
        let saved: Vec<SavedPhoto> = unwrap_envelope(
            "photos.saveWallPhoto",
            self.transport.post_form(&url, &form).await?,
        )?;
        let saved = saved
            .into_iter()
            .next()
            .ok_or_else(|| Error::Data("photos.saveWallPhoto saved no photo".into()))?;

        let attachment = Attachment {
            owner_id: saved.owner_id,
            media_id: saved.id,
        };
        info!("Saved wall photo {}", attachment);
        Ok(attachment)
    }

    pub async fn publish_post(&self, attachment: &Attachment, message: &str) -> Result<i64> {
        let url = self.method_url("wall.post")?;
        let form = self.base_params(vec![
            ("owner_id", format!("-{}", self.group_id)),
            ("from_group", "1".into()),
            ("attachments", attachment.to_string()),
            ("message", message.to_owned()),
        ]);
        let created: PostCreated =
            unwrap_envelope("wall.post", self.transport.post_form(&url, &form).await?)?;
        info!("Published post {}", created.post_id);
        Ok(created.post_id)
    }

    fn method_url(&self, method: &str) -> Result<Url> {
        self.api_url
            .join(method)
            .map_err(|e| Error::Data(format!("bad VK api url: {}", e)))
    }

    fn base_params(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("access_token", self.access_token.to_owned()));
        params.push(("v", self.api_version.to_owned()));
        params
    }
}

fn unwrap_envelope<R: DeserializeOwned>(method: &str, body: serde_json::Value) -> Result<R> {
    let envelope: Envelope<R> = serde_json::from_value(body)?;
    envelope.into_result(method)
}

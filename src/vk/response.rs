use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

/// Every VK method answers with either `{"response": ...}` or `{"error": ...}`,
/// usually with HTTP 200 in both cases.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub response: Option<T>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub error_code: i64,
    #[serde(default)]
    pub error_msg: String,
}

impl<T> Envelope<T> {
    pub fn into_result(self, method: &str) -> Result<T> {
        if let Some(error) = self.error {
            return Err(Error::Api {
                code: error.error_code,
                message: error.error_msg,
            });
        }
        self.response
            .ok_or_else(|| Error::Data(format!("{} returned neither response nor error", method)))
    }
}

#[derive(Deserialize, Debug)]
pub struct UploadServer {
    pub upload_url: String,
    pub album_id: Option<i64>,
    pub user_id: Option<i64>,
}

/// Body returned by the upload host itself (not wrapped in an envelope).
#[derive(Deserialize, Debug)]
pub struct UploadedPhoto {
    pub server: i64,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub hash: String,
}

#[derive(Deserialize, Debug)]
pub struct SavedPhoto {
    pub owner_id: i64,
    pub id: i64,
}

#[derive(Deserialize, Debug)]
pub struct PostCreated {
    pub post_id: i64,
}

/// Identifiers handed from the upload host to `photos.saveWallPhoto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSession {
    pub server_id: i64,
    pub photo_token: String,
    pub upload_hash: String,
}

/// A saved wall photo, rendered as `photo{owner}_{id}` for `wall.post`.
///
/// Group-owned media always carry a negative owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub owner_id: i64,
    pub media_id: i64,
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "photo-{}_{}", self.owner_id.unsigned_abs(), self.media_id)
    }
}

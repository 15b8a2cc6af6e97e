use crate::error::{Error, Result};
use crate::models::{Comic, ComicInfo};
use crate::transport::HttpTransport;
use log::{debug, info};
use rand::Rng;
use url::Url;

const INFO_FILE: &str = "info.0.json";

/// Read-only client for the comic archive's JSON metadata.
pub struct XkcdClient<'a, T: HttpTransport> {
    transport: &'a T,
    base_url: Url,
}

impl<'a, T: HttpTransport> XkcdClient<'a, T> {
    pub fn new(transport: &'a T, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Number of the latest published comic.
    pub async fn get_comic_count(&self) -> Result<u32> {
        let url = self.base_url.join(INFO_FILE).map_err(url_error)?;
        let info: ComicInfo = serde_json::from_value(self.transport.get_json(&url, &[]).await?)?;
        let count = info
            .num
            .ok_or_else(|| Error::Data("archive metadata has no `num`".into()))?;
        debug!("Archive holds {} comics", count);
        Ok(count)
    }

    pub async fn get_random_comic(&self, count: u32) -> Result<Comic> {
        let index = draw_index(count, &mut rand::thread_rng())?;
        self.get_comic(index).await
    }

    /// Draws an index uniformly from `1..=count` using `rng` and fetches that comic.
    pub async fn get_random_comic_with<R: Rng>(
        &self,
        count: u32,
        rng: &mut R,
    ) -> Result<Comic> {
        let index = draw_index(count, rng)?;
        self.get_comic(index).await
    }

    pub async fn get_comic(&self, index: u32) -> Result<Comic> {
        let url = self
            .base_url
            .join(&format!("{}/{}", index, INFO_FILE))
            .map_err(url_error)?;
        let info: ComicInfo = serde_json::from_value(self.transport.get_json(&url, &[]).await?)?;

        let image_url = info
            .img
            .filter(|img| !img.is_empty())
            .ok_or_else(|| Error::Data(format!("comic {} has no `img`", index)))?;
        let caption = info
            .alt
            .ok_or_else(|| Error::Data(format!("comic {} has no `alt`", index)))?;

        info!("Picked comic #{}: {}", index, image_url);
        Ok(Comic {
            index,
            image_url,
            caption,
        })
    }
}

fn draw_index<R: Rng>(count: u32, rng: &mut R) -> Result<u32> {
    if count == 0 {
        return Err(Error::Data("archive reports no comics".into()));
    }
    Ok(rng.gen_range(1..=count))
}

fn url_error(e: url::ParseError) -> Error {
    Error::Data(format!("bad archive url: {}", e))
}

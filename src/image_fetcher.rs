use crate::error::{Error, Result};
use crate::transport::HttpTransport;
use log::{debug, info};
use std::path::Path;
use url::Url;

/// File name (basename plus extension) of the last path segment of `image_url`.
///
/// The path is percent-decoded first; query and fragment are ignored.
pub fn derive_filename(image_url: &str) -> Result<String> {
    let url = Url::parse(image_url)
        .map_err(|e| Error::Data(format!("bad image url {}: {}", image_url, e)))?;
    let path = urlencoding::decode(url.path())
        .map_err(|e| Error::Data(format!("bad image url {}: {}", image_url, e)))?;

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => Ok(name.to_owned()),
        _ => Err(Error::Data(format!("image url {} names no file", image_url))),
    }
}

/// Downloads `url` into `directory` and returns the stored file name.
pub async fn fetch_and_store<T: HttpTransport>(
    transport: &T,
    url: &str,
    directory: &Path,
) -> Result<String> {
    let filename = derive_filename(url)?;
    let source = Url::parse(url).map_err(|e| Error::Data(e.to_string()))?;

    let bytes = transport.get_bytes(&source).await?;
    let target = directory.join(&filename);
    debug!("Writing {} bytes to {}", bytes.len(), target.display());
    tokio::fs::write(&target, &bytes).await?;

    info!("Stored image {}", target.display());
    Ok(filename)
}

use crate::configuration::Settings;
use crate::error::Result;
use crate::image_fetcher::fetch_and_store;
use crate::models::{Cli, Comic};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::vk::{Published, WallPublisher};
use crate::xkcd_client::XkcdClient;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use resolve_path::PathResolveExt;
use std::io;
use std::path::Path;

/// What a successful run posted.
#[derive(Debug)]
pub struct RunReport {
    pub comic: Comic,
    pub filename: String,
    pub published: Published,
}

pub async fn run(settings: Settings, cli: Cli) -> anyhow::Result<()> {
    let directory = cli.path.resolve().to_path_buf();
    info!("Image directory: {}", directory.display());

    let transport = ReqwestTransport::new()?;
    let mut rng = StdRng::from_entropy();
    run_with(&transport, &settings, &directory, &mut rng).await?;

    info!("Finished!");
    Ok(())
}

/// Picks a comic, stores its image in `directory` and posts it.
///
/// Once the image has been written it is removed before returning, whether
/// or not the publish succeeded. A failed download leaves the directory as it
/// was.
pub async fn run_with<T: HttpTransport, R: Rng>(
    transport: &T,
    settings: &Settings,
    directory: &Path,
    rng: &mut R,
) -> Result<RunReport> {
    tokio::fs::create_dir_all(directory).await?;

    let source = XkcdClient::new(transport, settings.archive_url.clone());
    let count = source.get_comic_count().await?;
    let comic = source.get_random_comic_with(count, rng).await?;

    let filename = fetch_and_store(transport, &comic.image_url, directory).await?;
    let photo_path = directory.join(&filename);

    let outcome = WallPublisher::new(transport, settings)
        .publish_photo(&photo_path, &comic.caption)
        .await;
    let cleanup = remove_image(&photo_path).await;

    let published = match (outcome, cleanup) {
        (Ok(published), Ok(())) => published,
        (Ok(_), Err(e)) => return Err(e),
        (Err(e), Ok(())) => return Err(e),
        (Err(e), Err(cleanup_err)) => {
            error!("Could not remove {}: {}", photo_path.display(), cleanup_err);
            return Err(e);
        }
    };

    info!("{} image has been successfully posted.", filename);
    Ok(RunReport {
        comic,
        filename,
        published,
    })
}

async fn remove_image(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Nothing to remove at {}", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

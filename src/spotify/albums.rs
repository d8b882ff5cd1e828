use serde_json::from_value;

use crate::{
    config,
    gateway::{GatewayError, Remote},
    types::AlbumObject,
};

/// Fetches an album with its complete track listing.
///
/// The listing arrives in disc and track-number order, which the pipeline
/// preserves all the way into the rendered output.
pub async fn get_album<R: Remote>(
    remote: &mut R,
    album_id: &str,
) -> Result<AlbumObject, GatewayError> {
    let api_url = format!(
        "{uri}/albums/{id}",
        uri = &config::spotify_apiurl(),
        id = album_id
    );

    let json = remote.request(&api_url).await?;
    let album: AlbumObject = from_value(json)?;

    Ok(album)
}

use serde_json::from_value;

use crate::{
    config,
    gateway::{GatewayError, Remote},
    types::{AlbumObject, ArtistAlbumsResponse},
};

/// Fetches the albums of an artist, in the order Spotify lists them.
///
/// The returned album objects carry no track listings; each album is
/// resolved individually during expansion.
pub async fn get_artist_albums<R: Remote>(
    remote: &mut R,
    artist_id: &str,
) -> Result<Vec<AlbumObject>, GatewayError> {
    let api_url = format!(
        "{uri}/artists/{id}/albums",
        uri = &config::spotify_apiurl(),
        id = artist_id
    );

    let json = remote.request(&api_url).await?;
    let response: ArtistAlbumsResponse = from_value(json)?;

    Ok(response.items)
}

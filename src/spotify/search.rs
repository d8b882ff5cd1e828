use serde_json::from_value;

use crate::{
    config,
    gateway::{GatewayError, Remote},
    types::{
        AlbumObject, AlbumSearchResponse, ArtistObject, ArtistSearchResponse, TrackObject,
        TrackSearchResponse,
    },
};

/// Searches Spotify for a track and returns the first hit.
///
/// Issues a track-typed search with the URL-encoded query and keeps only the
/// top result, which is what entry resolution binds a free-text query to.
///
/// # Arguments
///
/// * `remote` - Gateway to issue the request through
/// * `query` - Free-text search query, unencoded
///
/// # Returns
///
/// - `Ok(Some(TrackObject))` - the first search hit
/// - `Ok(None)` - the search succeeded but matched nothing
/// - `Err(GatewayError)` - transport, HTTP, parse, or API-envelope failure
///
/// # Response shape
///
/// The hit is a partial track object: it carries id, URI, name and artists,
/// but no popularity. Fetching the track by id yields the full object.
pub async fn search_track<R: Remote>(
    remote: &mut R,
    query: &str,
) -> Result<Option<TrackObject>, GatewayError> {
    let api_url = format!(
        "{uri}/search?type=track&q={q}",
        uri = &config::spotify_apiurl(),
        q = urlencoding::encode(query)
    );

    let json = remote.request(&api_url).await?;
    let response: TrackSearchResponse = from_value(json)?;

    Ok(response.tracks.items.into_iter().next())
}

/// Searches Spotify for an album and returns the first hit.
///
/// The hit carries no track listing; resolve it with
/// [`crate::spotify::albums::get_album`] to obtain the tracks.
pub async fn search_album<R: Remote>(
    remote: &mut R,
    query: &str,
) -> Result<Option<AlbumObject>, GatewayError> {
    let api_url = format!(
        "{uri}/search?type=album&q={q}",
        uri = &config::spotify_apiurl(),
        q = urlencoding::encode(query)
    );

    let json = remote.request(&api_url).await?;
    let response: AlbumSearchResponse = from_value(json)?;

    Ok(response.albums.items.into_iter().next())
}

/// Searches Spotify for an artist and returns the first hit.
pub async fn search_artist<R: Remote>(
    remote: &mut R,
    query: &str,
) -> Result<Option<ArtistObject>, GatewayError> {
    let api_url = format!(
        "{uri}/search?type=artist&q={q}",
        uri = &config::spotify_apiurl(),
        q = urlencoding::encode(query)
    );

    let json = remote.request(&api_url).await?;
    let response: ArtistSearchResponse = from_value(json)?;

    Ok(response.artists.items.into_iter().next())
}

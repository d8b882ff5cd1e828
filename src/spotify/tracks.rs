use serde_json::from_value;

use crate::{
    config,
    gateway::{GatewayError, Remote},
    types::TrackObject,
};

/// Fetches the full track object for a Spotify track id.
///
/// Unlike search hits and album-listing entries, the object returned by
/// `/tracks/{id}` carries `popularity` and the owning `album`, which is what
/// the popularity ordering and album grouping stages need.
///
/// # Arguments
///
/// * `remote` - Gateway to issue the request through
/// * `track_id` - Spotify id of the track
///
/// # Errors
///
/// An unknown id surfaces as an API-envelope error from the gateway; there
/// is no soft not-found path for direct lookups.
pub async fn get_track<R: Remote>(
    remote: &mut R,
    track_id: &str,
) -> Result<TrackObject, GatewayError> {
    let api_url = format!(
        "{uri}/tracks/{id}",
        uri = &config::spotify_apiurl(),
        id = track_id
    );

    let json = remote.request(&api_url).await?;
    let track: TrackObject = from_value(json)?;

    Ok(track)
}

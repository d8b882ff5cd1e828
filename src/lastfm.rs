use serde_json::from_value;

use crate::{
    config,
    gateway::{GatewayError, Remote},
    types::LastfmTrackInfoResponse,
};

/// Fetches the global Last.fm play count for a track.
///
/// Calls `track.getInfo` with the artist and title of an already-resolved
/// track. Last.fm serializes the count as a decimal string; a count that
/// does not parse is reported as `-1` (unknown), the same sentinel callers
/// use for tracks the annotator could not reach at all.
///
/// Pacing is inherited from the gateway: annotation requests share the one
/// in-flight-request budget with everything else.
pub async fn get_playcount<R: Remote>(
    remote: &mut R,
    artist: &str,
    title: &str,
) -> Result<i64, GatewayError> {
    let api_url = format!(
        "{uri}?method=track.getInfo&api_key={key}&artist={artist}&track={track}&format=json",
        uri = &config::lastfm_apiurl(),
        key = &config::lastfm_api_key(),
        artist = urlencoding::encode(artist),
        track = urlencoding::encode(title),
    );

    let json = remote.request(&api_url).await?;
    let response: LastfmTrackInfoResponse = from_value(json)?;

    Ok(response.track.playcount.parse::<i64>().unwrap_or(-1))
}

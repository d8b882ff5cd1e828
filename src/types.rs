use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Response structure for Spotify's track search endpoint.
///
/// Represents the top-level response when searching for tracks. The actual
/// hits are wrapped in a paging container under the `tracks` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSearchResponse {
    /// Container holding the track hits
    pub tracks: TracksPage,
}

/// Paging container for track objects.
///
/// Spotify wraps search hits and album listings in a paging object; only the
/// `items` list is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    /// Track objects in the current page
    pub items: Vec<TrackObject>,
}

/// Represents a Spotify track as returned by search, album listings, or the
/// direct track endpoint.
///
/// Search hits and album-listing entries are partial: they carry no
/// `popularity` and (for album listings) no `album` field. A track fetched
/// directly by id carries both. The same structure covers all three shapes,
/// with the optional fields absent on partial responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    /// Unique Spotify identifier for the track
    pub id: String,
    /// Spotify URI for the track (`spotify:track:<id>`)
    pub uri: String,
    /// Track title/name
    pub name: String,
    /// Artists credited on the track, in credit order
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    /// Album the track belongs to (absent on partial responses)
    #[serde(default)]
    pub album: Option<AlbumRef>,
    /// Popularity score 0-100 (absent on partial responses)
    #[serde(default)]
    pub popularity: Option<i64>,
}

/// An artist as referenced from a track or album object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Artist's display name
    pub name: String,
}

/// An album as referenced from a full track object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Album title/name
    pub name: String,
}

/// Response structure for Spotify's album search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumSearchResponse {
    /// Container holding the album hits
    pub albums: AlbumsPage,
}

/// Paging container for album objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumsPage {
    /// Album objects in the current page
    pub items: Vec<AlbumObject>,
}

/// Represents a Spotify album.
///
/// Search hits carry only the identifying metadata; the direct album
/// endpoint additionally returns the track listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumObject {
    /// Unique Spotify identifier for the album
    pub id: String,
    /// Album title/name
    pub name: String,
    /// Complete track listing (only present on direct album fetches)
    #[serde(default)]
    pub tracks: Option<TracksPage>,
}

/// Response structure for Spotify's artist search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    /// Container holding the artist hits
    pub artists: ArtistsPage,
}

/// Paging container for artist objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsPage {
    /// Artist objects in the current page
    pub items: Vec<ArtistObject>,
}

/// Represents a Spotify artist as returned by search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistObject {
    /// Unique Spotify identifier for the artist
    pub id: String,
    /// Artist's display name
    pub name: String,
}

/// Response structure for an artist's album listing.
///
/// Unlike search responses, `/artists/{id}/albums` returns the paging
/// container at the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistAlbumsResponse {
    /// Album objects in the current page
    pub items: Vec<AlbumObject>,
}

/// Response structure for Last.fm's `track.getInfo` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastfmTrackInfoResponse {
    /// The track information payload
    pub track: LastfmTrackInfo,
}

/// Track information as returned by Last.fm.
///
/// Last.fm serializes the play count as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastfmTrackInfo {
    /// Total play count across all listeners, as a decimal string
    pub playcount: String,
}

/// Represents a resolved track row for preview table display purposes.
#[derive(Tabled)]
pub struct TrackRow {
    /// Track title
    pub title: String,
    /// Comma-separated credited artists
    pub artists: String,
    /// Album name, empty when unknown
    pub album: String,
}

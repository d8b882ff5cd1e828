use std::fmt;

use crate::{
    gateway::{GatewayError, Remote},
    spotify,
    types::{AlbumObject, ArtistObject, TrackObject},
    utils, warning,
};

use super::queue::{Node, Queue};

/// A parsed line of the playlist program, before expansion.
///
/// All three variants share one contract: `expand` turns the entry into a
/// queue of tracks (possibly empty when nothing could be resolved). Entries
/// are consumed by expansion; the tracks they produce outlive them.
pub enum Entry {
    Track(Track),
    Album(Album),
    Artist(Artist),
}

impl Entry {
    /// The original input line this entry was parsed from.
    pub fn entry_text(&self) -> &str {
        match self {
            Entry::Track(track) => track.entry_text(),
            Entry::Album(album) => &album.entry_text,
            Entry::Artist(artist) => &artist.entry_text,
        }
    }

    pub async fn expand<R: Remote>(self, remote: &mut R) -> Result<Queue, GatewayError> {
        match self {
            Entry::Track(mut track) => {
                track.expand(remote).await?;
                let mut queue = Queue::new();
                queue.add(Node::Track(track));
                Ok(queue)
            }
            Entry::Album(album) => album.expand(remote).await,
            Entry::Artist(artist) => artist.expand(remote).await,
        }
    }
}

/// Resolution state of a track.
///
/// A track object obtained from search or an album listing is a simple
/// response and lacks popularity and album metadata; one fetched directly by
/// id is full. The only promotion path is `Simple -> Full` via the track
/// endpoint.
enum TrackState {
    Unresolved,
    Simple(TrackObject),
    Full(TrackObject),
}

/// A single track: either a free-text query, a track URI/link, or a track
/// emitted by an album expansion.
pub struct Track {
    entry_text: String,
    state: TrackState,
    playcount: i64,
}

impl Track {
    pub fn new(entry_text: &str) -> Self {
        Self {
            entry_text: entry_text.trim().to_string(),
            state: TrackState::Unresolved,
            playcount: -1,
        }
    }

    /// A track emitted by an album listing. It carries the album entry's
    /// text, so "group by entry" keeps album tracks together.
    pub fn from_listing(entry_text: &str, response: TrackObject) -> Self {
        Self {
            entry_text: entry_text.trim().to_string(),
            state: TrackState::Simple(response),
            playcount: -1,
        }
    }

    pub fn entry_text(&self) -> &str {
        &self.entry_text
    }

    fn response(&self) -> Option<&TrackObject> {
        match &self.state {
            TrackState::Unresolved => None,
            TrackState::Simple(response) | TrackState::Full(response) => Some(response),
        }
    }

    /// Whether the track carries a full response (fetched by id).
    pub fn is_full(&self) -> bool {
        matches!(self.state, TrackState::Full(_))
    }

    /// Canonical track URI; empty while unresolved.
    pub fn uri(&self) -> &str {
        self.response().map(|r| r.uri.as_str()).unwrap_or("")
    }

    /// Track id, from the response if resolved, else derived from the entry
    /// text when it is a URI or a track link.
    pub fn id(&self) -> Option<String> {
        match self.response() {
            Some(response) => Some(response.id.clone()),
            None => utils::track_id_from_text(&self.entry_text),
        }
    }

    pub fn title(&self) -> &str {
        self.response().map(|r| r.name.as_str()).unwrap_or("")
    }

    pub fn primary_artist(&self) -> &str {
        self.response()
            .and_then(|r| r.artists.first())
            .map(|a| a.name.as_str())
            .unwrap_or("")
    }

    pub fn all_artists(&self) -> Vec<&str> {
        self.response()
            .map(|r| r.artists.iter().map(|a| a.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Album name; only known on full responses.
    pub fn album_name(&self) -> &str {
        self.response()
            .and_then(|r| r.album.as_ref())
            .map(|a| a.name.as_str())
            .unwrap_or("")
    }

    /// Popularity score; meaningful only on full responses, `-1` otherwise.
    pub fn popularity(&self) -> i64 {
        match &self.state {
            TrackState::Full(response) => response.popularity.unwrap_or(-1),
            _ => -1,
        }
    }

    pub fn playcount(&self) -> i64 {
        self.playcount
    }

    pub fn set_playcount(&mut self, playcount: i64) {
        self.playcount = playcount;
    }

    /// Case-folded display string; this is what track equality and dedup
    /// compare. Two unresolved tracks with the same query text are equal
    /// even though they might resolve to different tracks.
    pub fn display_key(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// Resolves the track one step further, to a full response at most.
    ///
    /// - already full: nothing to do
    /// - simple, or the entry text carries a track id: fetch the full track
    /// - otherwise: search; the first hit with a URI becomes the simple
    ///   response, no hit leaves the track unresolved (not an error)
    pub async fn expand<R: Remote>(&mut self, remote: &mut R) -> Result<(), GatewayError> {
        match &self.state {
            TrackState::Full(_) => Ok(()),
            TrackState::Simple(response) => {
                let track_id = response.id.clone();
                let full = spotify::tracks::get_track(remote, &track_id).await?;
                self.state = TrackState::Full(full);
                Ok(())
            }
            TrackState::Unresolved => {
                if let Some(track_id) = utils::track_id_from_text(&self.entry_text) {
                    let full = spotify::tracks::get_track(remote, &track_id).await?;
                    self.state = TrackState::Full(full);
                    return Ok(());
                }

                match spotify::search::search_track(remote, &self.entry_text).await? {
                    Some(hit) if !hit.uri.is_empty() => self.state = TrackState::Simple(hit),
                    _ => warning!("COULD NOT FIND {}", self.entry_text),
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.response() {
            Some(_) => write!(f, "{} - {}", self.primary_artist(), self.title()),
            None => write!(f, "{}", self.entry_text),
        }
    }
}

/// An `#ALBUM` line: resolves to an album and emits its full track listing.
pub struct Album {
    entry_text: String,
    search_response: Option<AlbumObject>,
    album_response: Option<AlbumObject>,
}

impl Album {
    pub fn new(entry_text: &str) -> Self {
        Self {
            entry_text: entry_text.trim().to_string(),
            search_response: None,
            album_response: None,
        }
    }

    /// An album entry pre-seeded with a search hit, as built during artist
    /// expansion; `expand` skips the search and fetches the album directly.
    pub fn with_search(entry_text: &str, search_response: AlbumObject) -> Self {
        Self {
            entry_text: entry_text.trim().to_string(),
            search_response: Some(search_response),
            album_response: None,
        }
    }

    pub async fn expand<R: Remote>(mut self, remote: &mut R) -> Result<Queue, GatewayError> {
        let album_id = match (&self.album_response, &self.search_response) {
            (Some(album), _) => album.id.clone(),
            (None, Some(hit)) => hit.id.clone(),
            (None, None) => match spotify::search::search_album(remote, &self.entry_text).await? {
                Some(hit) => {
                    let album_id = hit.id.clone();
                    self.search_response = Some(hit);
                    album_id
                }
                None => {
                    warning!("COULD NOT FIND {}", self.entry_text);
                    return Ok(Queue::new());
                }
            },
        };

        let album = spotify::albums::get_album(remote, &album_id).await?;

        let mut queue = Queue::new();
        if let Some(tracks) = &album.tracks {
            // listing order is preserved into the output
            for item in &tracks.items {
                queue.add(Node::Track(Track::from_listing(
                    &self.entry_text,
                    item.clone(),
                )));
            }
        }
        self.album_response = Some(album);

        Ok(queue)
    }
}

/// An `#ARTIST` line: resolves to an artist and expands the artist's whole
/// discography, album by album.
pub struct Artist {
    entry_text: String,
    search_response: Option<ArtistObject>,
}

impl Artist {
    pub fn new(entry_text: &str) -> Self {
        Self {
            entry_text: entry_text.trim().to_string(),
            search_response: None,
        }
    }

    pub async fn expand<R: Remote>(mut self, remote: &mut R) -> Result<Queue, GatewayError> {
        let artist = match self.search_response.take() {
            Some(hit) => hit,
            None => match spotify::search::search_artist(remote, &self.entry_text).await? {
                Some(hit) => hit,
                None => {
                    warning!("COULD NOT FIND {}", self.entry_text);
                    return Ok(Queue::new());
                }
            },
        };

        let albums = spotify::artists::get_artist_albums(remote, &artist.id).await?;

        // One album entry per release, reusing the artist's entry text, then
        // resolved through the same sequential driver. The result is a queue
        // of queues of tracks; `flatten` collapses it later.
        let mut pending = Queue::new();
        for album in albums {
            pending.add(Node::Entry(Entry::Album(Album::with_search(
                &self.entry_text,
                album,
            ))));
        }

        Ok(pending.dispatch_boxed(remote).await)
    }
}

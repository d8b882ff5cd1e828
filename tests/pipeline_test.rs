use std::collections::HashMap;
use std::sync::Once;

use reqwest::StatusCode;
use serde_json::{Value, json};

use spogencli::gateway::{GatewayError, Remote};
use spogencli::parser::parse;

// The spotify/lastfm layers build URLs from the configured API bases; pin
// them once for the whole test binary.
fn init_env() {
    static INIT: Once = Once::new();
    INIT.call_once(|| unsafe {
        std::env::set_var("SPOTIFY_API_URL", "https://api.spotify.com/v1");
        std::env::set_var("LASTFM_API_URL", "https://ws.audioscrobbler.com/2.0/");
        std::env::set_var("LASTFM_API_KEY", "testkey");
    });
}

fn api(path: &str) -> String {
    format!("https://api.spotify.com/v1{}", path)
}

fn lastfm(artist: &str, title: &str) -> String {
    format!(
        "https://ws.audioscrobbler.com/2.0/?method=track.getInfo&api_key=testkey&artist={}&track={}&format=json",
        urlencoding::encode(artist),
        urlencoding::encode(title),
    )
}

/// Canned-response stand-in for the HTTP gateway. Unknown URLs answer 404,
/// which exercises the soft-failure path the same way a live miss would.
struct MockRemote {
    responses: HashMap<String, Value>,
    log: Vec<String>,
    cancel_after: Option<usize>,
}

impl MockRemote {
    fn new(responses: Vec<(String, Value)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            log: Vec::new(),
            cancel_after: None,
        }
    }
}

impl Remote for MockRemote {
    async fn request(&mut self, url: &str) -> Result<Value, GatewayError> {
        self.log.push(url.to_string());
        match self.responses.get(url) {
            Some(value) => Ok(value.clone()),
            None => Err(GatewayError::Http(StatusCode::NOT_FOUND)),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_after
            .is_some_and(|after| self.log.len() >= after)
    }
}

fn simple_track(id: &str, name: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "uri": format!("spotify:track:{}", id),
        "name": name,
        "artists": [{"name": artist}],
    })
}

fn full_track(id: &str, name: &str, artist: &str, album: &str, popularity: i64) -> Value {
    json!({
        "id": id,
        "uri": format!("spotify:track:{}", id),
        "name": name,
        "artists": [{"name": artist}],
        "album": {"name": album},
        "popularity": popularity,
    })
}

fn track_search(query: &str, hits: Vec<Value>) -> (String, Value) {
    (
        api(&format!("/search?type=track&q={}", urlencoding::encode(query))),
        json!({"tracks": {"items": hits}}),
    )
}

async fn run(program: &str, remote: &mut MockRemote) -> String {
    let mut playlist = parse(program);
    playlist.dispatch(remote).await;
    playlist.render()
}

#[tokio::test]
async fn test_track_uri_resolved_by_id() {
    init_env();

    // S1: a URI entry goes straight to the track endpoint
    let mut remote = MockRemote::new(vec![(
        api("/tracks/abc123def456ghi789jkl0"),
        full_track("abc123def456ghi789jkl0", "Song", "Artist", "Album", 50),
    )]);

    let output = run("spotify:track:abc123def456ghi789jkl0", &mut remote).await;

    assert_eq!(output, "spotify:track:abc123def456ghi789jkl0");
    assert_eq!(remote.log, vec![api("/tracks/abc123def456ghi789jkl0")]);
}

#[tokio::test]
async fn test_album_expansion_in_listing_order() {
    init_env();

    // S2: one album search, one album fetch, tracks in listing order
    let mut remote = MockRemote::new(vec![
        (
            api(&format!("/search?type=album&q={}", urlencoding::encode("Kid A"))),
            json!({"albums": {"items": [{"id": "alb1", "name": "Kid A"}]}}),
        ),
        (
            api("/albums/alb1"),
            json!({
                "id": "alb1",
                "name": "Kid A",
                "tracks": {"items": [
                    simple_track("t1", "Everything in Its Right Place", "Radiohead"),
                    simple_track("t2", "Kid A", "Radiohead"),
                    simple_track("t3", "The National Anthem", "Radiohead"),
                ]},
            }),
        ),
    ]);

    let output = run("#ALBUM Kid A", &mut remote).await;

    assert_eq!(
        output,
        "spotify:track:t1\nspotify:track:t2\nspotify:track:t3"
    );
    assert_eq!(remote.log.len(), 2);
}

#[tokio::test]
async fn test_artist_expansion_is_sequential_and_ordered() {
    init_env();

    let mut remote = MockRemote::new(vec![
        (
            api(&format!("/search?type=artist&q={}", urlencoding::encode("Radiohead"))),
            json!({"artists": {"items": [{"id": "art1", "name": "Radiohead"}]}}),
        ),
        (
            api("/artists/art1/albums"),
            json!({"items": [
                {"id": "alb1", "name": "Kid A"},
                {"id": "alb2", "name": "OK Computer"},
            ]}),
        ),
        (
            api("/albums/alb1"),
            json!({"id": "alb1", "name": "Kid A", "tracks": {"items": [
                simple_track("t1", "Kid A", "Radiohead"),
            ]}}),
        ),
        (
            api("/albums/alb2"),
            json!({"id": "alb2", "name": "OK Computer", "tracks": {"items": [
                simple_track("t2", "Airbag", "Radiohead"),
                simple_track("t3", "Paranoid Android", "Radiohead"),
            ]}}),
        ),
    ]);

    let output = run("#ARTIST Radiohead", &mut remote).await;

    // Albums in discography order, tracks in listing order
    assert_eq!(
        output,
        "spotify:track:t1\nspotify:track:t2\nspotify:track:t3"
    );

    // Strictly sequential: search, discography, then one fetch per album
    assert_eq!(
        remote.log,
        vec![
            api(&format!("/search?type=artist&q={}", urlencoding::encode("Radiohead"))),
            api("/artists/art1/albums"),
            api("/albums/alb1"),
            api("/albums/alb2"),
        ]
    );
}

#[tokio::test]
async fn test_duplicate_entries_dedup_to_first() {
    init_env();

    // S3: both entries are searched, one track survives
    let mut remote = MockRemote::new(vec![track_search(
        "foo",
        vec![simple_track("t1", "Foo", "Bar")],
    )]);

    let output = run("foo\nfoo\n", &mut remote).await;

    assert_eq!(output, "spotify:track:t1");
    assert_eq!(remote.log.len(), 2);
}

#[tokio::test]
async fn test_order_by_popularity_refreshes_and_sorts() {
    init_env();

    // S4: simple tracks are promoted to full before sorting
    let mut remote = MockRemote::new(vec![
        track_search("track1", vec![simple_track("t1", "Track One", "A")]),
        track_search("track2", vec![simple_track("t2", "Track Two", "B")]),
        (api("/tracks/t1"), full_track("t1", "Track One", "A", "X", 30)),
        (api("/tracks/t2"), full_track("t2", "Track Two", "B", "Y", 70)),
    ]);

    let output = run("#ORDER BY POPULARITY\ntrack1\ntrack2\n", &mut remote).await;

    assert_eq!(output, "spotify:track:t2\nspotify:track:t1");
}

#[tokio::test]
async fn test_popularity_ties_keep_input_order() {
    init_env();

    let mut remote = MockRemote::new(vec![
        track_search("track1", vec![simple_track("t1", "Track One", "A")]),
        track_search("track2", vec![simple_track("t2", "Track Two", "B")]),
        (api("/tracks/t1"), full_track("t1", "Track One", "A", "X", 50)),
        (api("/tracks/t2"), full_track("t2", "Track Two", "B", "Y", 50)),
    ]);

    let output = run("#ORDER BY POPULARITY\ntrack1\ntrack2\n", &mut remote).await;

    // Equal keys: stable sort keeps parsed order
    assert_eq!(output, "spotify:track:t1\nspotify:track:t2");
}

#[tokio::test]
async fn test_failed_refresh_keeps_track_with_unknown_popularity() {
    init_env();

    // t2 cannot be refreshed (404): it keeps popularity -1 and sorts last,
    // but is still rendered
    let mut remote = MockRemote::new(vec![
        track_search("track1", vec![simple_track("t1", "Track One", "A")]),
        track_search("track2", vec![simple_track("t2", "Track Two", "B")]),
        (api("/tracks/t1"), full_track("t1", "Track One", "A", "X", 10)),
    ]);

    let output = run("#ORDER BY POPULARITY\ntrack1\ntrack2\n", &mut remote).await;

    assert_eq!(output, "spotify:track:t1\nspotify:track:t2");
}

#[tokio::test]
async fn test_group_by_artist() {
    init_env();

    // S5: groups anchored at first appearance, intra-group order preserved
    let mut remote = MockRemote::new(vec![
        track_search("A-song", vec![simple_track("t1", "A-song", "A")]),
        track_search("B-song", vec![simple_track("t2", "B-song", "B")]),
        track_search("A-other", vec![simple_track("t3", "A-other", "A")]),
    ]);

    let output = run("#GROUP BY ARTIST\nA-song\nB-song\nA-other\n", &mut remote).await;

    assert_eq!(
        output,
        "spotify:track:t1\nspotify:track:t3\nspotify:track:t2"
    );
}

#[tokio::test]
async fn test_group_by_entry_keeps_album_tracks_together() {
    init_env();

    // Tracks emitted by an album expansion carry the album's entry text
    let mut remote = MockRemote::new(vec![
        (
            api(&format!("/search?type=album&q={}", urlencoding::encode("Kid A"))),
            json!({"albums": {"items": [{"id": "alb1", "name": "Kid A"}]}}),
        ),
        (
            api("/albums/alb1"),
            json!({"id": "alb1", "name": "Kid A", "tracks": {"items": [
                simple_track("t1", "Kid A", "Radiohead"),
                simple_track("t2", "Idioteque", "Radiohead"),
            ]}}),
        ),
        track_search("solo", vec![simple_track("t3", "Solo", "Someone")]),
    ]);

    let output = run("#GROUP BY ENTRY\n#ALBUM Kid A\nsolo\n", &mut remote).await;

    assert_eq!(
        output,
        "spotify:track:t1\nspotify:track:t2\nspotify:track:t3"
    );
}

#[tokio::test]
async fn test_order_by_lastfm_playcount() {
    init_env();

    let mut remote = MockRemote::new(vec![
        track_search("foo", vec![simple_track("t1", "Foo", "A")]),
        track_search("bar", vec![simple_track("t2", "Bar", "B")]),
        (lastfm("A", "Foo"), json!({"track": {"playcount": "5"}})),
        (lastfm("B", "Bar"), json!({"track": {"playcount": "99"}})),
    ]);

    let output = run("#ORDER BY LASTFM\nfoo\nbar\n", &mut remote).await;

    assert_eq!(output, "spotify:track:t2\nspotify:track:t1");
}

#[tokio::test]
async fn test_unannotated_tracks_sort_last_stably() {
    init_env();

    // Only one track is known to Last.fm; the others keep -1 and trail in
    // their original relative order
    let mut remote = MockRemote::new(vec![
        track_search("foo", vec![simple_track("t1", "Foo", "A")]),
        track_search("bar", vec![simple_track("t2", "Bar", "B")]),
        track_search("baz", vec![simple_track("t3", "Baz", "C")]),
        (lastfm("B", "Bar"), json!({"track": {"playcount": "10"}})),
    ]);

    let output = run("#SORT BY LAST.FM\nfoo\nbar\nbaz\n", &mut remote).await;

    assert_eq!(
        output,
        "spotify:track:t2\nspotify:track:t1\nspotify:track:t3"
    );
}

#[tokio::test]
async fn test_not_found_yields_empty_output() {
    init_env();

    // S6: an empty search result drops the entry without failing the run
    let mut remote = MockRemote::new(vec![track_search("nonexistent-xyz", vec![])]);

    let output = run("nonexistent-xyz\n", &mut remote).await;

    assert_eq!(output, "");
    assert_eq!(remote.log.len(), 1);
}

#[tokio::test]
async fn test_failed_entry_does_not_abort_the_run() {
    init_env();

    // The first search 404s entirely; the second still resolves
    let mut remote = MockRemote::new(vec![track_search(
        "good",
        vec![simple_track("t1", "Good", "A")],
    )]);

    let output = run("bad\ngood\n", &mut remote).await;

    assert_eq!(output, "spotify:track:t1");
    assert_eq!(remote.log.len(), 2);
}

#[tokio::test]
async fn test_search_hit_without_uri_stays_unresolved() {
    init_env();

    // A hit with an empty uri cannot be rendered; no output line is empty
    let mut remote = MockRemote::new(vec![track_search(
        "weird",
        vec![json!({"id": "t1", "uri": "", "name": "Weird", "artists": [{"name": "A"}]})],
    )]);

    let output = run("weird\n", &mut remote).await;

    assert_eq!(output, "");
}

#[tokio::test]
async fn test_output_is_deterministic() {
    init_env();

    let responses = || {
        vec![
            track_search("foo", vec![simple_track("t1", "Foo", "A")]),
            track_search("bar", vec![simple_track("t2", "Bar", "B")]),
        ]
    };

    let mut first = MockRemote::new(responses());
    let mut second = MockRemote::new(responses());

    let program = "foo\nbar\n";
    let output_a = run(program, &mut first).await;
    let output_b = run(program, &mut second).await;

    // Same responses, byte-identical output and request sequence
    assert_eq!(output_a, output_b);
    assert_eq!(first.log, second.log);
}

#[tokio::test]
async fn test_output_lines_are_well_formed() {
    init_env();

    let mut remote = MockRemote::new(vec![
        track_search("foo", vec![simple_track("t1abc", "Foo", "A")]),
        track_search("bar", vec![simple_track("t2def", "Bar", "B")]),
    ]);

    let output = run("foo\nbar\n", &mut remote).await;

    for line in output.lines() {
        assert!(!line.is_empty());
        let mut parts = line.split(':');
        assert_eq!(parts.next(), Some("spotify"));
        assert_eq!(parts.next(), Some("track"));
        assert!(parts.next().unwrap().chars().all(|c| c.is_ascii_alphanumeric()));
    }
    assert!(!output.ends_with('\n'));
}

#[tokio::test]
async fn test_cancellation_stops_dispatching() {
    init_env();

    let mut remote = MockRemote::new(vec![
        track_search("foo", vec![simple_track("t1", "Foo", "A")]),
        track_search("bar", vec![simple_track("t2", "Bar", "B")]),
    ]);
    remote.cancel_after = Some(1);

    let output = run("foo\nbar\n", &mut remote).await;

    // Only the first entry was resolved before the signal took effect
    assert_eq!(remote.log.len(), 1);
    assert_eq!(output, "spotify:track:t1");
}

use spogencli::utils::*;

#[test]
fn test_track_id_from_uri() {
    // Canonical URI form
    let id = track_id_from_text("spotify:track:6rqhFgbbKwnb9MLmUQDhG6");
    assert_eq!(id, Some("6rqhFgbbKwnb9MLmUQDhG6".to_string()));

    // Any scheme works, only the `track` segment is fixed
    let id = track_id_from_text("otherservice:track:abc123");
    assert_eq!(id, Some("abc123".to_string()));

    // Non-track URIs are not track references
    assert_eq!(track_id_from_text("spotify:album:abc123"), None);

    // Empty id segment does not count
    assert_eq!(track_id_from_text("spotify:track:"), None);
}

#[test]
fn test_track_id_from_link() {
    // Plain web link
    let id = track_id_from_text("https://open.spotify.com/track/6rqhFgbbKwnb9MLmUQDhG6");
    assert_eq!(id, Some("6rqhFgbbKwnb9MLmUQDhG6".to_string()));

    // Query parameters are stripped from the id segment
    let id = track_id_from_text("https://open.spotify.com/track/abc123?si=shared");
    assert_eq!(id, Some("abc123".to_string()));

    // http also accepted
    let id = track_id_from_text("http://open.spotify.com/track/abc123");
    assert_eq!(id, Some("abc123".to_string()));

    // Non-track links are not track references
    assert_eq!(
        track_id_from_text("https://open.spotify.com/album/abc123"),
        None
    );

    // Not a link at all
    assert_eq!(track_id_from_text("just a search query"), None);
}

#[test]
fn test_is_track_reference() {
    assert!(is_track_reference("spotify:track:abc123"));
    assert!(is_track_reference(
        "https://open.spotify.com/track/abc123"
    ));
    assert!(!is_track_reference("bohemian rhapsody"));
}

#[test]
fn test_unescape_newlines() {
    // Literal \n sequences become real newlines
    assert_eq!(unescape_newlines("a\\nb\\nc"), "a\nb\nc");

    // Text without escapes is unchanged
    assert_eq!(unescape_newlines("plain text"), "plain text");

    // Already-real newlines are left alone
    assert_eq!(unescape_newlines("a\nb"), "a\nb");
}

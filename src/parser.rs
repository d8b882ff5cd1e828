use crate::playlist::{Album, Artist, Entry, GroupBy, Node, OrderBy, Playlist, Track};

/// Parses a playlist program into a [`Playlist`].
///
/// The input splits on CR, LF, or CRLF. Each non-empty line is classified by
/// case-insensitive prefix:
///
/// - `##` comment, skipped
/// - `#ORDER BY POPULARITY` select popularity ordering
/// - `#ORDER BY LASTFM` / `#SORT BY LAST.FM` select Last.fm ordering
/// - `#GROUP BY ENTRY` / `ARTIST` / `ALBUM` select grouping
/// - `#UNIQUE` dedup the result (on by default)
/// - `#ALBUM <query>` album entry
/// - `#ARTIST <query>` artist entry
/// - anything else a track entry for the whole line
///
/// Unknown `#` directives are treated as comments. Parsing does no I/O and
/// never fails; a program of nothing but blank lines yields an empty
/// playlist.
pub fn parse(input: &str) -> Playlist {
    let mut playlist = Playlist::default();

    for raw_line in input.split(['\r', '\n']) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(body) = line.strip_prefix('#') else {
            playlist.entries.add(Node::Entry(Entry::Track(Track::new(line))));
            continue;
        };

        if body.starts_with('#') {
            continue; // comment
        }

        if directive(body, "ORDER BY POPULARITY").is_some() {
            playlist.ordering = OrderBy::Popularity;
        } else if is_lastfm_ordering(body) {
            playlist.ordering = OrderBy::Lastfm;
        } else if let Some(target) = directive(body, "GROUP BY ") {
            match target.to_uppercase().as_str() {
                "ENTRY" => playlist.grouping = GroupBy::Entry,
                "ARTIST" => playlist.grouping = GroupBy::Artist,
                "ALBUM" => playlist.grouping = GroupBy::Album,
                _ => {} // unknown target, ignored
            }
        } else if directive(body, "UNIQUE").is_some() {
            playlist.unique = true;
        } else if let Some(query) = directive(body, "ALBUM ") {
            playlist
                .entries
                .add(Node::Entry(Entry::Album(Album::new(query))));
        } else if let Some(query) = directive(body, "ARTIST ") {
            playlist
                .entries
                .add(Node::Entry(Entry::Artist(Artist::new(query))));
        }
        // any other directive is silently ignored
    }

    playlist
}

/// Case-insensitive prefix match; returns the trimmed remainder on a hit.
fn directive<'a>(body: &'a str, keyword: &str) -> Option<&'a str> {
    let head = body.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(body[keyword.len()..].trim())
    } else {
        None
    }
}

/// Matches `(SORT|ORDER) BY LASTFM`, with an optional separator between
/// `LAST` and `FM` (`LAST.FM`, `LAST FM`).
fn is_lastfm_ordering(body: &str) -> bool {
    for keyword in ["SORT BY LAST", "ORDER BY LAST"] {
        if let Some(rest) = directive(body, keyword) {
            if rest.eq_ignore_ascii_case("FM") {
                return true;
            }
            // one separator character, then FM
            let mut chars = rest.chars();
            chars.next();
            if chars.as_str().eq_ignore_ascii_case("FM") {
                return true;
            }
        }
    }
    false
}

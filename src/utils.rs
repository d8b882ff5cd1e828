pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn id_from_uri(text: &str) -> Option<String> {
    let mut parts = text.splitn(3, ':');
    let _scheme = parts.next()?;
    if parts.next()? != "track" {
        return None;
    }
    let id = parts.next()?;
    if id.is_empty() { None } else { Some(id.to_string()) }
}

fn id_from_link(text: &str) -> Option<String> {
    if !text.starts_with("http://") && !text.starts_with("https://") {
        return None;
    }

    // https://<host>/track/<id> -> the id is the 5th slash-separated segment
    let segment = text.split('/').nth(4)?;
    let id = segment
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();
    if text.split('/').nth(3) != Some("track") || id.is_empty() {
        return None;
    }

    Some(id.to_string())
}

pub fn track_id_from_text(text: &str) -> Option<String> {
    id_from_uri(text).or_else(|| id_from_link(text))
}

pub fn is_track_reference(text: &str) -> bool {
    track_id_from_text(text).is_some()
}

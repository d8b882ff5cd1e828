use std::{cmp::Ordering, collections::HashSet, pin::Pin};

use crate::{gateway::Remote, lastfm, warning};

use super::entry::{Entry, Track};

/// One slot in a queue: an unexpanded entry, a resolved track, or a nested
/// queue produced by album/artist expansion (removed by `flatten`).
pub enum Node {
    Entry(Entry),
    Track(Track),
    Nested(Queue),
}

/// Ordered container the whole pipeline operates on.
///
/// All mutating operations are stable: they never reorder items relative to
/// each other beyond what the operation itself defines.
#[derive(Default)]
pub struct Queue {
    items: Vec<Node>,
}

impl Queue {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn add(&mut self, node: Node) {
        self.items.push(node);
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn concat(&mut self, other: Queue) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.items.iter()
    }

    /// Iterates the track payloads, skipping non-track nodes.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.items.iter().filter_map(|node| match node {
            Node::Track(track) => Some(track),
            _ => None,
        })
    }

    /// Whether an equal track (case-folded display string) is already queued.
    pub fn contains(&self, track: &Track) -> bool {
        self.tracks()
            .any(|queued| queued.display_key() == track.display_key())
    }

    /// Removes duplicate tracks, keeping the first occurrence of each
    /// equivalence class. Non-track nodes are left alone.
    pub fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.items.retain(|node| match node {
            Node::Track(track) => seen.insert(track.display_key()),
            _ => true,
        });
    }

    /// Stable sort over the track nodes. Pairs involving a non-track node
    /// compare equal, so anything that is not a track keeps its position.
    pub fn sort_tracks_by<F>(&mut self, cmp: F)
    where
        F: Fn(&Track, &Track) -> Ordering,
    {
        self.items.sort_by(|a, b| match (a, b) {
            (Node::Track(x), Node::Track(y)) => cmp(x, y),
            _ => Ordering::Equal,
        });
    }

    /// Stable partition: reorders the queue into contiguous groups, keyed by
    /// `key`, in first-appearance order of each key. Items inside a group
    /// keep their relative order. The empty string is a key like any other.
    pub fn group_by<F>(&mut self, key: F)
    where
        F: Fn(&Track) -> String,
    {
        let mut keys: Vec<String> = Vec::new();
        let mut groups: Vec<Vec<Node>> = Vec::new();

        for node in self.items.drain(..) {
            let group_key = match &node {
                Node::Track(track) => key(track),
                _ => String::new(),
            };
            match keys.iter().position(|existing| *existing == group_key) {
                Some(index) => groups[index].push(node),
                None => {
                    keys.push(group_key);
                    groups.push(vec![node]);
                }
            }
        }

        self.items = groups.into_iter().flatten().collect();
    }

    /// Recursively inlines nested queues; everything else passes through.
    /// Flattening an already-flat queue is a no-op.
    pub fn flatten(self) -> Queue {
        fn walk(nodes: Vec<Node>, out: &mut Vec<Node>) {
            for node in nodes {
                match node {
                    Node::Nested(queue) => walk(queue.items, out),
                    other => out.push(other),
                }
            }
        }

        let mut items = Vec::new();
        walk(self.items, &mut items);
        Queue { items }
    }

    /// The sequential resolver: expands each entry in order, awaiting every
    /// expansion to completion before the next one starts, so there is never
    /// more than one remote request in flight.
    ///
    /// An entry whose expansion fails contributes nothing; the failure is
    /// logged and the run continues. A cancellation stops the walk without
    /// issuing further requests.
    pub async fn dispatch<R: Remote>(self, remote: &mut R) -> Queue {
        let mut resolved = Queue::new();

        for node in self.items {
            if remote.is_cancelled() {
                break;
            }
            match node {
                Node::Entry(entry) => {
                    let entry_text = entry.entry_text().to_string();
                    match entry.expand(remote).await {
                        Ok(queue) => resolved.add(Node::Nested(queue)),
                        Err(e) => warning!("Failed to resolve '{}': {}", entry_text, e),
                    }
                }
                other => resolved.add(other),
            }
        }

        resolved
    }

    /// Boxed variant of [`Queue::dispatch`] for recursive expansion (an
    /// artist entry dispatches the queue of its album entries).
    pub fn dispatch_boxed<'a, R: Remote>(
        self,
        remote: &'a mut R,
    ) -> Pin<Box<dyn Future<Output = Queue> + 'a>> {
        Box::pin(self.dispatch(remote))
    }

    /// Re-dispatches every track in place, promoting search results to full
    /// track objects. Tracks that cannot be refreshed keep their current
    /// state.
    pub async fn refresh<R: Remote>(&mut self, remote: &mut R) {
        for node in &mut self.items {
            if remote.is_cancelled() {
                break;
            }
            if let Node::Track(track) = node {
                if let Err(e) = track.expand(remote).await {
                    warning!("Failed to refresh '{}': {}", track, e);
                }
            }
        }
    }

    /// Fetches Last.fm play counts for every track, sequentially. A track
    /// the annotator cannot resolve keeps `playcount = -1` and therefore
    /// sorts after annotated tracks.
    pub async fn annotate<R: Remote>(&mut self, remote: &mut R) {
        for node in &mut self.items {
            if remote.is_cancelled() {
                break;
            }
            if let Node::Track(track) = node {
                let artist = track.primary_artist().to_string();
                let title = track.title().to_string();
                let result = lastfm::get_playcount(remote, &artist, &title).await;
                match result {
                    Ok(playcount) => track.set_playcount(playcount),
                    Err(e) => warning!("Failed to annotate '{}': {}", track, e),
                }
            }
        }
    }
}

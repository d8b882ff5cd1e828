use crate::gateway::Remote;

use super::queue::Queue;

/// Ordering selected by the program's directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    None,
    Popularity,
    Lastfm,
}

/// Grouping selected by the program's directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    None,
    Entry,
    Artist,
    Album,
}

/// Top-level playlist state and the pipeline driver.
///
/// Built by the parser with `entries` holding one node per program entry;
/// after [`Playlist::dispatch`] every node is a resolved track and the
/// post-processing stages have been applied in their fixed order:
/// expand, dedup, order, group.
pub struct Playlist {
    pub entries: Queue,
    pub ordering: OrderBy,
    pub grouping: GroupBy,
    pub unique: bool,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            entries: Queue::new(),
            ordering: OrderBy::None,
            grouping: GroupBy::None,
            unique: true,
        }
    }
}

impl Playlist {
    /// Runs the assembly pipeline to completion.
    ///
    /// Remote failures never abort the run: a failed entry is dropped, a
    /// failed refresh or annotation leaves the affected track with its
    /// sentinel values. After this returns, `entries` is flat and contains
    /// only tracks.
    pub async fn dispatch<R: Remote>(&mut self, remote: &mut R) {
        // expand
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries.dispatch(remote).await.flatten();

        // dedup
        if self.unique {
            self.entries.dedup();
        }

        // order
        match self.ordering {
            OrderBy::Popularity => {
                // popularity is only known on full responses
                self.entries.refresh(remote).await;
                self.entries
                    .sort_tracks_by(|a, b| b.popularity().cmp(&a.popularity()));
            }
            OrderBy::Lastfm => {
                self.entries.annotate(remote).await;
                self.entries
                    .sort_tracks_by(|a, b| b.playcount().cmp(&a.playcount()));
            }
            OrderBy::None => {}
        }

        // group
        match self.grouping {
            GroupBy::Artist => {
                self.entries
                    .group_by(|track| track.primary_artist().to_lowercase());
            }
            GroupBy::Album => {
                // album names are only known on full responses
                self.entries.refresh(remote).await;
                self.entries
                    .group_by(|track| track.album_name().to_lowercase());
            }
            GroupBy::Entry => {
                self.entries
                    .group_by(|track| track.entry_text().to_lowercase());
            }
            GroupBy::None => {}
        }
    }

    /// Renders the final output: one URI per line, unresolved tracks
    /// skipped, no trailing newline.
    pub fn render(&self) -> String {
        self.entries
            .tracks()
            .map(|track| track.uri())
            .filter(|uri| !uri.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

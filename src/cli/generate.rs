use std::{io::Read, path::PathBuf, sync::atomic::Ordering, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res, config, error,
    gateway::{Gateway, Remote},
    info, parser, success,
    types::TrackRow,
    utils, warning,
};

/// Runs the full generation pipeline: read program, resolve, render, write.
///
/// The program text comes from `--program` (inline, `\n`-escaped), from a
/// file argument, or from STDIN when the argument is `-`. The rendered URI
/// list goes to STDOUT unless `--output` names a file.
pub async fn generate(
    program: Option<String>,
    input: Option<String>,
    output: Option<String>,
    preview: bool,
) {
    let text = match read_program(program, input).await {
        Ok(text) => text,
        Err(e) => error!("Cannot read playlist program: {}", e),
    };

    let mut playlist = parser::parse(&text);
    if playlist.entries.is_empty() {
        warning!("Program contains no entries");
    }
    info!("Parsed {} entries", playlist.entries.len());

    let mut gateway = Gateway::new(Some(config::spotify_token()));

    // Ctrl-C stops dispatching after the in-flight request finishes.
    let cancel = gateway.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving entries...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    playlist.dispatch(&mut gateway).await;
    pb.finish_and_clear();

    if gateway.is_cancelled() {
        warning!("Cancelled; no output written");
        return;
    }

    let resolved = playlist
        .entries
        .tracks()
        .filter(|track| !track.uri().is_empty())
        .count();
    success!("Resolved {} of {} tracks", resolved, playlist.entries.len());

    if preview {
        let rows: Vec<TrackRow> = playlist
            .entries
            .tracks()
            .filter(|track| !track.uri().is_empty())
            .map(|track| TrackRow {
                title: track.title().to_string(),
                artists: track.all_artists().join(", "),
                album: track.album_name().to_string(),
            })
            .collect();
        eprintln!("{}", Table::new(rows));
    }

    let rendered = playlist.render();

    match output {
        Some(path) => {
            if let Err(e) = write_output(&path, &rendered).await {
                error!("Cannot write playlist to {}: {}", path, e);
            }
            success!("Playlist written to {}", path);
        }
        None => {
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
    }
}

async fn read_program(program: Option<String>, input: Option<String>) -> Res<String> {
    if let Some(text) = program {
        return Ok(utils::unescape_newlines(&text));
    }

    match input.as_deref() {
        Some("-") => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => Ok(async_fs::read_to_string(path).await?),
        None => Err("no program file given (pass a file, '-' for STDIN, or --program)".into()),
    }
}

async fn write_output(path: &str, rendered: &str) -> Res<()> {
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let mut contents = rendered.to_string();
    if !contents.is_empty() {
        contents.push('\n');
    }
    async_fs::write(&path, contents).await?;
    Ok(())
}

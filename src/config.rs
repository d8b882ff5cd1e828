use dotenv;
use std::{env, path::PathBuf};

pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spogencli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // A missing .env is fine when the variables are already exported.
    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

pub fn spotify_token() -> String {
    env::var("SPOTIFY_API_TOKEN").expect("SPOTIFY_API_TOKEN must be set")
}

pub fn lastfm_apiurl() -> String {
    env::var("LASTFM_API_URL").expect("LASTFM_API_URL must be set")
}

pub fn lastfm_api_key() -> String {
    env::var("LASTFM_API_KEY").expect("LASTFM_API_KEY must be set")
}

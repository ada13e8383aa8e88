//! One-time interactive Spotify authorization.
//!
//! Opens the browser for the authorization-code flow and seeds the
//! on-disk token cache (`.cache-spotify`) that the dashboard's passive
//! status probe reads and refreshes.  The dashboard itself never prompts.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rspotify::{prelude::*, scopes, AuthCodeSpotify, Config, Credentials, OAuth};

fn main() -> Result<()> {
    env_logger::init();

    let Ok(id) = std::env::var("SPOTIFY_CLIENT_ID") else {
        bail!("SPOTIFY_CLIENT_ID is not set");
    };
    let Ok(secret) = std::env::var("SPOTIFY_CLIENT_SECRET") else {
        bail!("SPOTIFY_CLIENT_SECRET is not set");
    };
    let redirect_uri = std::env::var("SPOTIFY_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:7777/callback".to_string());

    let creds = Credentials::new(&id, &secret);
    let oauth = OAuth {
        redirect_uri,
        scopes: scopes!(
            "user-read-recently-played",
            "playlist-read-private",
            "user-library-read"
        ),
        ..Default::default()
    };
    let config = Config {
        token_cached: true,
        token_refreshing: true,
        cache_path: PathBuf::from(".cache-spotify"),
        ..Default::default()
    };

    let spotify = AuthCodeSpotify::with_config(creds, oauth, config);

    let url = spotify
        .get_authorize_url(false)
        .context("building authorize URL")?;
    spotify
        .prompt_for_token(&url)
        .context("authorization flow failed")?;

    println!("Token cached at .cache-spotify; the dashboard will now report \"connected\".");
    Ok(())
}

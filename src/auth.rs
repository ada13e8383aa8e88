use std::path::PathBuf;

use rspotify::{prelude::*, scopes, AuthCodeSpotify, Config, Credentials, OAuth};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Spotify connection status
// ---------------------------------------------------------------------------

/// Where the token cache lives; the `spotify_login` helper writes it, the
/// dashboard's probe only reads and refreshes it.
const TOKEN_CACHE: &str = ".cache-spotify";

const DEFAULT_REDIRECT_URI: &str = "http://localhost:7777/callback";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("SPOTIFY_CLIENT_ID / SPOTIFY_CLIENT_SECRET not set")]
    MissingCredentials,
    #[error("no cached token; run the spotify_login helper once to authorize")]
    NoCachedToken,
    #[error("token cache lock poisoned")]
    TokenCache,
    #[error("Spotify authentication failed: {0}")]
    Spotify(#[from] rspotify::ClientError),
}

/// Sidebar-facing connection state.  Purely informational: the aggregation
/// pipeline consumes nothing from the live API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotifyStatus {
    Connected,
    NotConnected,
}

impl SpotifyStatus {
    pub fn label(self) -> &'static str {
        match self {
            SpotifyStatus::Connected => "Spotify auth: connected",
            SpotifyStatus::NotConnected => "Spotify auth: not connected (using exported data)",
        }
    }

    pub fn is_connected(self) -> bool {
        matches!(self, SpotifyStatus::Connected)
    }
}

/// Build the OAuth client from `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`
/// and `SPOTIFY_REDIRECT_URI`.  Missing credentials are the expected
/// "not configured" state, not a fault.
pub fn client_from_env() -> Result<AuthCodeSpotify, AuthError> {
    let id = std::env::var("SPOTIFY_CLIENT_ID").ok();
    let secret = std::env::var("SPOTIFY_CLIENT_SECRET").ok();
    let (Some(id), Some(secret)) = (id, secret) else {
        return Err(AuthError::MissingCredentials);
    };
    let redirect_uri = std::env::var("SPOTIFY_REDIRECT_URI")
        .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());

    let creds = Credentials::new(&id, &secret);
    // Read-only scopes matching what the exporter notebook asks for.
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
        cache_path: PathBuf::from(TOKEN_CACHE),
        ..Default::default()
    };

    Ok(AuthCodeSpotify::with_config(creds, oauth, config))
}

/// Probe for a usable token without ever prompting: cached token first,
/// refreshed when stale.  Degrades to `NotConnected` on every failure;
/// nothing here may raise into the render path.
pub fn probe_status() -> SpotifyStatus {
    match try_cached_token() {
        Ok(()) => SpotifyStatus::Connected,
        Err(AuthError::MissingCredentials) | Err(AuthError::NoCachedToken) => {
            SpotifyStatus::NotConnected
        }
        Err(err) => {
            log::warn!("spotify token probe failed: {err}");
            SpotifyStatus::NotConnected
        }
    }
}

fn try_cached_token() -> Result<(), AuthError> {
    let client = client_from_env()?;
    let token = client
        .read_token_cache(true)?
        .ok_or(AuthError::NoCachedToken)?;
    let expired = token.is_expired();
    {
        let mut guard = client.token.lock().map_err(|_| AuthError::TokenCache)?;
        *guard = Some(token);
    }
    if expired {
        client.refresh_token()?;
        log::debug!("refreshed cached spotify token");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_the_sidebar_copy() {
        assert_eq!(SpotifyStatus::Connected.label(), "Spotify auth: connected");
        assert!(SpotifyStatus::NotConnected.label().contains("not connected"));
        assert!(SpotifyStatus::Connected.is_connected());
        assert!(!SpotifyStatus::NotConnected.is_connected());
    }
}

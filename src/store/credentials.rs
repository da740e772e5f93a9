//! Persisted credential token and the Session Flag it seeds.
//!
//! The token itself is opaque; the store only cares whether one exists.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{LocalKey, LocalState, LocalStore, LocalValue, StoreError};
use crate::models::LaunchId;

const APP_NAME: &str = "launchpad";
const TOKEN_FILE: &str = "token";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Token file error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Location of the persisted login token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/launchpad/token`.
    pub fn default_location() -> Result<Self, CredentialError> {
        let mut path = dirs::config_dir().ok_or(CredentialError::NoConfigDir)?;
        path.push(APP_NAME);
        path.push(TOKEN_FILE);
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a non-empty token is stored. Unreadable files count as absent.
    pub fn has_token(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(token) => !token.trim().is_empty(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read token: {}", e);
                false
            }
        }
    }

    pub fn save(&self, token: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Remove the token. Succeeds if there was none.
    pub fn clear(&self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Initial store contents: logged in iff a token is stored.
pub fn seed_state(tokens: &TokenStore, cart_items: Vec<LaunchId>) -> LocalState {
    LocalState {
        is_logged_in: tokens.has_token(),
        cart_items,
    }
}

/// Persist `token` and raise the Session Flag.
pub fn login(store: &LocalStore, tokens: &TokenStore, token: &str) -> Result<(), CredentialError> {
    tokens.save(token)?;
    store.set(LocalKey::IsLoggedIn, LocalValue::Bool(true))?;
    tracing::info!("Logged in");
    Ok(())
}

/// Drop the token, lower the Session Flag and empty the cart.
pub fn logout(store: &LocalStore, tokens: &TokenStore) -> Result<(), CredentialError> {
    tokens.clear()?;
    store.set(LocalKey::IsLoggedIn, LocalValue::Bool(false))?;
    store.set(LocalKey::CartItems, LocalValue::Ids(Vec::new()))?;
    tracing::info!("Logged out");
    Ok(())
}

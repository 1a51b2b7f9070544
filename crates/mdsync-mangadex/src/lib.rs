#[macro_use]
extern crate log;

pub mod client;
pub use client::{Credentials, MangaDex};

pub mod token;
pub use token::{Token, TokenState, TokenStore};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("authorization failed: {0}")]
    AuthFailed(String),
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("other error: {0}")]
    Other(#[from] anyhow::Error),
}

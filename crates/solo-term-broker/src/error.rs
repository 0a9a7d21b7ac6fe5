//! Broker errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot resolve user identity: {0}")]
    Identity(String),

    #[error("channel error: {0}")]
    Channel(#[from] solo_term_channel::ChannelError),

    #[error("window error: {0}")]
    Window(#[from] solo_term_window::WindowError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

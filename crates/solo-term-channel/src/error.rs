//! Channel subsystem errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("failed to create or open shared region {name:?}: {source}")]
    Region {
        name: String,
        #[source]
        source: shared_memory::ShmemError,
    },

    #[error("shared region {name:?} is too small: {size} bytes")]
    RegionTooSmall { name: String, size: usize },

    #[error("failed to create guard mutex {name:?}: {source}")]
    Mutex {
        name: String,
        #[source]
        source: named_lock::Error,
    },

    #[error("failed to acquire guard mutex: {0}")]
    Lock(#[source] named_lock::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

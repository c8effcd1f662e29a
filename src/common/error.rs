//! Errors raised while building environments, loading configuration and shaping output.
//!
//! The numeric core never returns these: malformed arrays are programmer errors and surface as
//! index panics where they are used.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid grid shape {nx}x{ny}: both dimensions must be non-zero")]
    InvalidShape { nx: usize, ny: usize },

    #[error("Terminal state {state} is outside the state space 0..{n_s}")]
    TerminalOutOfRange { state: usize, n_s: usize },

    #[error("Discount factor must be within [0, 1], got {0}")]
    InvalidDiscount(f64),

    #[error("Cannot reshape {len} items into a {nx}x{ny} grid")]
    Reshape {
        len: usize,
        nx: usize,
        ny: usize,
        #[source]
        source: ndarray::ShapeError,
    },

    #[error("Cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

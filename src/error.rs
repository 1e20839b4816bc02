use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced around the dictionary.
///
/// The tree engines themselves never fail: a duplicate insert or a missing
/// delete is reported as `false`, not as an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The tree type selector names no known balancing strategy.
    #[error("unknown tree type: {0:?} (expected \"AVL\" or \"Red-Black\")")]
    InvalidStrategy(String),

    /// A batch source could not be opened or read.
    #[error("cannot read word list{}: {source}", display_path(.path))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;

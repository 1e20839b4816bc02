//! Batch loading of newline-delimited word lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::dictionary::{BatchOutcome, BulkOp, Dictionary};
use crate::error::{Error, Result};

/// Applies `op` to every word read from `reader`, one word per line.
///
/// Lines are trimmed and blank lines are skipped. Words are applied as they
/// are read, so a read error aborts the batch with everything before it
/// already applied.
pub fn apply_reader<R: BufRead>(
    dictionary: &mut Dictionary<String>,
    reader: R,
    op: BulkOp,
) -> Result<BatchOutcome> {
    let mut outcome = BatchOutcome::default();
    for line in reader.lines() {
        let line = line.map_err(|source| Error::Io { path: None, source })?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        outcome.record(dictionary.apply_one(word.to_string(), op));
    }
    Ok(outcome)
}

/// Applies `op` to every word listed in the file at `path`.
pub fn apply_file<P: AsRef<Path>>(
    dictionary: &mut Dictionary<String>,
    path: P,
    op: BulkOp,
) -> Result<BatchOutcome> {
    let path = path.as_ref();
    let with_path = |source| Error::Io {
        path: Some(path.to_path_buf()),
        source,
    };

    let file = File::open(path).map_err(with_path)?;
    match apply_reader(dictionary, BufReader::new(file), op) {
        Ok(outcome) => {
            info!(
                path = %path.display(),
                ?op,
                succeeded = outcome.succeeded,
                rejected = outcome.rejected,
                "word list applied"
            );
            Ok(outcome)
        }
        Err(Error::Io { source, .. }) => {
            warn!(path = %path.display(), error = %source, "word list read failed");
            Err(with_path(source))
        }
        Err(err) => Err(err),
    }
}

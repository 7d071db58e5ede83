// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Import resolution error types.

use std::path::PathBuf;

use thiserror::Error;

/// An error raised while splicing imports.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The import graph revisited an already-imported file.
    #[error("circular import: {}", path.display())]
    CircularImport { path: PathBuf },

    /// An imported file could not be read or canonicalised.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An imported file failed to parse. Carries the first parse
    /// error's position and message.
    #[error("{}:{line}:{col}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u32,
        col: u32,
        message: String,
    },
}

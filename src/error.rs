//! The ways loading a manifest can fail. Malformed lines are not among them:
//! those are logged and skipped by the parsers.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A fatal failure of [`crate::load`] or [`crate::load_manifest`]
#[derive(Debug, Error)]
pub enum LoadError {
    /// The format tag names neither of the known manifest formats
    #[error(
        "unknown manifest type `{tag}`, expecting one of {}",
        crate::ManifestFormat::TAGS.join(", ")
    )]
    Format {
        /// The tag as the caller supplied it
        tag: String,
    },

    /// The manifest couldn't be opened or read
    #[error("can't read manifest {}", .path.display())]
    File {
        /// The manifest's path
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: io::Error,
    },
}

/// A result key name that isn't one of `ResultKey::as_str`'s identifiers
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown result key `{0}`, expecting one of intersect, dep-only, base-only")]
pub struct UnknownResultKey(pub String);

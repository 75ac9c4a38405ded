//! Measures how the [`AvlTree`][crate::avl::AvlTree] and the
//! [unbalanced baseline][crate::unbalanced::Tree] cope with a real dataset fed to them in sorted
//! and in shuffled order.
//!
//! The harness only talks to the trees through [`SearchTree`]: it builds every tree by
//! inserting, probes it with lookups, and reports how long each batch took.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod dataset;
pub mod report;
pub mod timing;

pub use dataset::{parse_movies, read_movies, Movie};
pub use report::append_csv;
pub use timing::{run, time_inserts, time_searches, SearchTree, Timings};

/// Errors from reading datasets and writing reports.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The dataset couldn't be read.
    #[error("failed to read dataset {path}")]
    Read {
        /// The dataset being read.
        path: PathBuf,
        /// Why the read failed.
        #[source]
        source: io::Error,
    },

    /// The report couldn't be appended to.
    #[error("failed to write report {path}")]
    Write {
        /// The report being written.
        path: PathBuf,
        /// Why the write failed.
        #[source]
        source: io::Error,
    },
}

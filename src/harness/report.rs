//! Human readable summaries and CSV rows for [`Timings`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::{HarnessError, Timings};

/// Column order of [`Timings::csv_row`].
pub const CSV_COLUMNS: &str = "N,bst_ins_sorted,bst_ins_rand,avl_ins_sorted,avl_ins_rand,\
                               bst_find_sorted,bst_find_rand,avl_find_sorted,avl_find_rand";

impl Timings {
    /// One CSV line (without the newline) with every figure in nanoseconds. See
    /// [`CSV_COLUMNS`].
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{}",
            self.n,
            self.bst_insert_sorted.as_nanos(),
            self.bst_insert_shuffled.as_nanos(),
            self.avl_insert_sorted.as_nanos(),
            self.avl_insert_shuffled.as_nanos(),
            self.bst_find_sorted.as_nanos(),
            self.bst_find_shuffled.as_nanos(),
            self.avl_find_sorted.as_nanos(),
            self.avl_find_shuffled.as_nanos(),
        )
    }
}

impl fmt::Display for Timings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "================================";

        writeln!(f, "{RULE}")?;
        writeln!(f, "N = {}", self.n)?;
        writeln!(f, "Insert (nanoseconds):")?;
        writeln!(f, "  BST sorted   : {}", self.bst_insert_sorted.as_nanos())?;
        writeln!(f, "  BST shuffled : {}", self.bst_insert_shuffled.as_nanos())?;
        writeln!(f, "  AVL sorted   : {}", self.avl_insert_sorted.as_nanos())?;
        writeln!(f, "  AVL shuffled : {}", self.avl_insert_shuffled.as_nanos())?;
        writeln!(f, "Search (nanoseconds):")?;
        writeln!(f, "  BST (sorted tree)   : {}", self.bst_find_sorted.as_nanos())?;
        writeln!(f, "  BST (shuffled tree) : {}", self.bst_find_shuffled.as_nanos())?;
        writeln!(f, "  AVL (sorted tree)   : {}", self.avl_find_sorted.as_nanos())?;
        writeln!(f, "  AVL (shuffled tree) : {}", self.avl_find_shuffled.as_nanos())?;
        writeln!(f, "{RULE}")
    }
}

/// Appends `timings` as one CSV row to the file at `path`, creating the file if needed. No
/// header is written so repeated runs accumulate in one table.
///
/// # Errors
///
/// Returns [`HarnessError::Write`] if the file can't be opened or written.
pub fn append_csv(path: impl AsRef<Path>, timings: &Timings) -> Result<(), HarnessError> {
    let path = path.as_ref();
    let write_error = |source| HarnessError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error)?;
    writeln!(file, "{}", timings.csv_row()).map_err(write_error)?;

    info!(path = %path.display(), n = timings.n, "appended results");
    Ok(())
}

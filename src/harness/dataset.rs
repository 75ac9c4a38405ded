//! Movie records read from a `title,year,rating,votes` CSV file.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::HarnessError;

/// One row of the dataset.
///
/// Movies are ordered by title, then year, then votes, then rating.
#[derive(Debug, Clone)]
pub struct Movie {
    /// The movie's title with surrounding whitespace removed.
    pub title: String,
    /// Release year, or 0 if the field didn't parse.
    pub year: i32,
    /// Average rating, or 0.0 if the field didn't parse.
    pub rating: f64,
    /// Number of votes, or 0 if the field didn't parse.
    pub votes: i32,
}

impl Movie {
    /// Builds a movie from its fields.
    pub fn new(title: impl Into<String>, year: i32, rating: f64, votes: i32) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            votes,
        }
    }

    /// Parses a CSV line. Returns `None` for lines with fewer than four fields.
    fn from_line(line: &str) -> Option<Self> {
        let mut fields = line.split(',');
        let title = fields.next()?.trim();
        let year = fields.next()?;
        let rating = fields.next()?;
        let votes = fields.next()?;

        Some(Self::new(
            title,
            year.trim().parse().unwrap_or(0),
            rating.trim().parse().unwrap_or(0.0),
            votes.trim().parse().unwrap_or(0),
        ))
    }
}

impl Ord for Movie {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title
            .cmp(&other.title)
            .then(self.year.cmp(&other.year))
            .then(self.votes.cmp(&other.votes))
            .then(self.rating.total_cmp(&other.rating))
    }
}

impl PartialOrd for Movie {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Movie {}

/// A first line mentioning both a title and a year is a header, not a movie.
fn looks_like_header(line: &str) -> bool {
    let line = line.to_lowercase();
    line.contains("title") && line.contains("year")
}

/// Reads up to `limit` movies from `reader`. A header line is skipped, as are lines with too few
/// fields. Numeric fields that don't parse are read as zero.
///
/// # Errors
///
/// Returns any error from reading `reader`.
pub fn parse_movies<R: BufRead>(reader: R, limit: usize) -> io::Result<Vec<Movie>> {
    let mut movies = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        if movies.len() >= limit {
            break;
        }
        let line = line?;
        if index == 0 && looks_like_header(&line) {
            continue;
        }
        match Movie::from_line(&line) {
            Some(movie) => movies.push(movie),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped rows with fewer than four fields");
    }
    Ok(movies)
}

/// Reads up to `limit` movies from the CSV file at `path`. See [`parse_movies`].
///
/// # Errors
///
/// Returns [`HarnessError::Read`] if the file can't be opened or read.
pub fn read_movies(path: impl AsRef<Path>, limit: usize) -> Result<Vec<Movie>, HarnessError> {
    let path = path.as_ref();
    let read_error = |source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let movies = parse_movies(BufReader::new(file), limit).map_err(read_error)?;
    debug!(path = %path.display(), rows = movies.len(), "read dataset");
    Ok(movies)
}

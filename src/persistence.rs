//! Results output and reading saved results back.
//!
//! Text format for `solutions.txt`:
//! - one block per solution
//! - one line per grid row, cell labels separated by single spaces
//! - a blank line after every block
//!
//! The file is opened in append mode so repeated runs accumulate results.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use crate::error::Error;
use crate::grid::{Grid, PieceId};
use crate::solver::Solution;

/// Default results file name.
pub const SOLUTIONS_TXT: &str = "solutions.txt";

/// Destination for solutions found by the driver.
///
/// Only the collector calls `record`, so implementations need no locking.
pub trait SolutionSink {
    fn record(&mut self, solution: &Solution) -> io::Result<()>;

    /// Called once after the last solution.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SolutionSink for Vec<Solution> {
    fn record(&mut self, solution: &Solution) -> io::Result<()> {
        self.push(solution.clone());
        Ok(())
    }
}

/// Writes solutions in the text format above.
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextSink<BufWriter<File>> {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SolutionSink for TextSink<W> {
    fn record(&mut self, solution: &Solution) -> io::Result<()> {
        write!(self.writer, "{}", solution.grid)?;
        writeln!(self.writer)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Reads every grid from a results stream.
pub fn load_grids(reader: impl BufRead) -> Result<Vec<Grid>, Error> {
    let mut grids = Vec::new();
    let mut rows: Vec<Vec<PieceId>> = Vec::new();
    let mut line_number = 0;

    for line in reader.lines() {
        let line = line?;
        line_number += 1;

        if line.trim().is_empty() {
            if !rows.is_empty() {
                grids.push(finish_block(&rows, line_number)?);
                rows.clear();
            }
            continue;
        }

        let row = line
            .split_whitespace()
            .map(str::parse::<PieceId>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::Results {
                line: line_number,
                reason: e.to_string(),
            })?;
        rows.push(row);
    }

    if !rows.is_empty() {
        grids.push(finish_block(&rows, line_number)?);
    }

    Ok(grids)
}

fn finish_block(rows: &[Vec<PieceId>], line: usize) -> Result<Grid, Error> {
    Grid::from_rows(rows).ok_or_else(|| Error::Results {
        line,
        reason: "rows have different lengths".to_string(),
    })
}

/// Loads all grids from a results file. `None` if the file does not exist.
pub fn load_all(path: impl AsRef<Path>) -> Result<Option<Vec<Grid>>, Error> {
    match File::open(path) {
        Ok(file) => load_grids(io::BufReader::new(file)).map(Some),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Counts saved grids without keeping them. `None` if the file does not exist.
pub fn count(path: impl AsRef<Path>) -> Result<Option<usize>, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut blocks = 0;
    let mut in_block = false;
    for line in io::BufReader::new(file).lines() {
        let blank = line?.trim().is_empty();
        if !blank && !in_block {
            blocks += 1;
        }
        in_block = !blank;
    }
    Ok(Some(blocks))
}

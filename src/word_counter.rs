//! Word frequency counting on top of any `MapSet<String, u64>`, plus the
//! two-column report format used to persist the counts.
//!
//! Report layout:
//!
//! ```text
//! Total Word Count : 9
//! the 3
//! cat 1
//! ```
//!
//! Entry lines follow the backing map's `entries()` order.

use crate::bst_map::BstMap;
use crate::chained_hash_map::{ListHashMap, TreeHashMap};
use crate::map_set::MapSet;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Label of the report's first line.
pub const REPORT_HEADER: &str = "Total Word Count";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("report is empty; expected a `Total Word Count : <n>` header")]
    MissingHeader,
    #[error("malformed report header: {0:?}")]
    MalformedHeader(String),
    #[error("malformed report line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Which container backs a counter chosen at runtime.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    Tree,
    TreeHash { capacity: usize },
    ListHash { capacity: usize },
}

impl Backend {
    pub fn build(self) -> Box<dyn MapSet<String, u64>> {
        match self {
            Backend::Tree => Box::new(BstMap::<String, u64>::new()),
            Backend::TreeHash { capacity } => Box::new(TreeHashMap::<String, u64>::new(capacity)),
            Backend::ListHash { capacity } => Box::new(ListHashMap::<String, u64>::new(capacity)),
        }
    }
}

/// Split a line into lowercase words. Word characters are ASCII letters,
/// digits and the apostrophe; everything else separates words.
pub fn tokenize(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

pub struct WordCounter<M> {
    map: M,
    total: u64,
}

impl WordCounter<Box<dyn MapSet<String, u64>>> {
    pub fn with_backend(backend: Backend) -> Self {
        Self::new(backend.build())
    }
}

impl<M> WordCounter<M>
where
    M: MapSet<String, u64>,
{
    pub fn new(map: M) -> Self {
        Self { map, total: 0 }
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn into_map(self) -> M {
        self.map
    }

    /// Every word seen, counting repeats.
    pub fn total_words(&self) -> u64 {
        self.total
    }

    pub fn unique_words(&self) -> usize {
        self.map.len()
    }

    pub fn count(&self, word: &str) -> Option<u64> {
        self.map.get(&word.to_string()).copied()
    }

    /// Share of all words that were `word`; `None` when it never occurred
    /// or the total is zero.
    pub fn frequency(&self, word: &str) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let count = self.count(word)?;
        Some(count as f64 / self.total as f64)
    }

    pub fn clear(&mut self) {
        self.total = 0;
        self.map.clear();
    }

    /// Count one occurrence of `word`.
    pub fn record(&mut self, word: String) {
        let count = match self.map.get(&word) {
            Some(seen) => seen + 1,
            None => 1,
        };
        self.map.put(word, count);
        self.total += 1;
    }

    /// Add every word read from `reader` to the counts.
    pub fn analyze<R: BufRead>(&mut self, reader: R) -> Result<(), ReportError> {
        let before = self.total;
        for line in reader.lines() {
            let line = line?;
            for word in tokenize(&line) {
                self.record(word);
            }
        }
        debug!(
            "analyzed {} words; {} total, {} unique",
            self.total - before,
            self.total,
            self.map.len()
        );
        Ok(())
    }

    pub fn analyze_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ReportError> {
        let file = File::open(path)?;
        self.analyze(BufReader::new(file))
    }

    pub fn write_report<W: Write>(&self, mut out: W) -> Result<(), ReportError> {
        writeln!(out, "{} : {}", REPORT_HEADER, self.total)?;
        for pair in self.map.entries() {
            writeln!(out, "{} {}", pair.key(), pair.value())?;
        }
        out.flush()?;
        debug!("wrote report: {} entries, {} total", self.map.len(), self.total);
        Ok(())
    }

    pub fn write_report_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ReportError> {
        let file = File::create(path)?;
        self.write_report(BufWriter::new(file))
    }

    /// Replace the current counts with the ones in a report. Blank lines
    /// are skipped. The whole report is parsed before anything is replaced,
    /// so on error the current counts are left untouched.
    pub fn read_report<R: BufRead>(&mut self, reader: R) -> Result<(), ReportError> {
        let mut lines = reader.lines();
        let header = lines.next().ok_or(ReportError::MissingHeader)??;
        let total = parse_header(&header)?;
        let mut staged = Vec::new();
        for (i, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let Some((word, count)) = parse_entry(&line) else {
                return Err(ReportError::MalformedLine {
                    line: i + 2,
                    content: line,
                });
            };
            staged.push((word.to_string(), count));
        }
        self.clear();
        self.total = total;
        for (word, count) in staged {
            self.map.put(word, count);
        }
        debug!("read report: {} entries, {} total", self.map.len(), self.total);
        Ok(())
    }

    pub fn read_report_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ReportError> {
        let file = File::open(path)?;
        self.read_report(BufReader::new(file))
    }
}

fn parse_header(header: &str) -> Result<u64, ReportError> {
    let malformed = || ReportError::MalformedHeader(header.to_string());
    let (label, total) = header.split_once(':').ok_or_else(malformed)?;
    if label.trim() != REPORT_HEADER {
        return Err(malformed());
    }
    total.trim().parse().map_err(|_| malformed())
}

fn parse_entry(line: &str) -> Option<(&str, u64)> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let count = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((word, count))
}

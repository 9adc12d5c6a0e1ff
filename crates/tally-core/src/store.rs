//! CSV persistence for the ledger
//!
//! The file has exactly four columns, `Date,Description,Amount,Category`,
//! with a header row and no index column. Saves are atomic: the ledger is
//! written to a temporary file in the same directory and then renamed over
//! the target, so a failed save leaves the previous file intact.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::categorize::Categorizer;
use crate::error::{Error, Result};
use crate::ledger::{Ledger, LoadOutcome, COLUMNS};
use crate::models::DATE_FORMAT;

/// One persisted row; field order matches [`COLUMNS`]
#[derive(Serialize)]
struct LedgerRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'a str,
}

/// Parse CSV data into a ledger
pub fn read_ledger<R: Read>(reader: R, categorizer: &Categorizer) -> Result<LoadOutcome> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let records = rdr
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!("Read {} ledger rows", records.len());
    Ledger::load(&headers, records, categorizer)
}

/// Write a ledger as CSV, header included
pub fn write_ledger<W: Write>(writer: W, ledger: &Ledger) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written explicitly so an empty ledger still gets a header
    wtr.write_record(COLUMNS)?;
    for tx in ledger {
        wtr.serialize(LedgerRow {
            date: tx.date.format(DATE_FORMAT).to_string(),
            description: &tx.description,
            // Shortest representation that parses back to the same value
            amount: tx.amount.to_string(),
            category: &tx.category,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// The ledger file on disk
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create an empty ledger file (header only) if none exists
    ///
    /// Returns true when a new file was written.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&Ledger::new())?;
        Ok(true)
    }

    pub fn load(&self, categorizer: &Categorizer) -> Result<LoadOutcome> {
        let file = File::open(&self.path)?;
        let outcome = read_ledger(file, categorizer)?;
        info!(
            path = %self.path.display(),
            transactions = outcome.ledger.len(),
            dropped = outcome.dropped(),
            "Loaded ledger"
        );
        Ok(outcome)
    }

    /// Overwrite the file with `ledger`
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        write_ledger(&mut temp, ledger)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "Saved ledger"
        );
        Ok(())
    }
}

//! An interactive session over one ledger file
//!
//! The session owns the current [`Ledger`] value and its [`LedgerStore`].
//! Appending is write-through: the new ledger is saved first and only
//! replaces the in-memory ledger once the save has succeeded, so memory and
//! disk never diverge. Single writer only; concurrent sessions against the
//! same file are not coordinated.

use tracing::info;

use crate::categorize::Categorizer;
use crate::error::Result;
use crate::ledger::{Ledger, LoadOutcome};
use crate::models::{NewTransaction, SkippedRow, Transaction};
use crate::store::LedgerStore;

pub struct Session {
    store: LedgerStore,
    categorizer: Categorizer,
    ledger: Ledger,
    skipped: Vec<SkippedRow>,
}

impl Session {
    /// Load the ledger from `store` (the transition into the loaded state)
    pub fn open(store: LedgerStore, categorizer: Categorizer) -> Result<Self> {
        let LoadOutcome { ledger, skipped } = store.load(&categorizer)?;
        Ok(Self {
            store,
            categorizer,
            ledger,
            skipped,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    /// Rows dropped when the session was opened
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Append a transaction and flush the ledger to disk
    ///
    /// A missing category is assigned by the categorizer. On a validation
    /// or I/O error the session's ledger is left unchanged.
    pub fn append(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let transaction = new.into_transaction(&self.categorizer);
        let next = self.ledger.append(transaction)?;
        self.store.save(&next)?;
        self.ledger = next;

        let added = &self.ledger.transactions()[self.ledger.len() - 1];
        info!(
            date = %added.date,
            amount = added.amount,
            category = %added.category,
            "Transaction added"
        );
        Ok(added)
    }
}

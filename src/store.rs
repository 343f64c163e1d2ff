// 🗄️ Record Store - in-memory expense list backed by a JSON file

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::codec;
use crate::error::StoreError;
use crate::expense::Expense;

/// Ordered list of expenses plus the file it is persisted to.
///
/// Every [`save`](ExpenseStore::save) rewrites the whole file.
#[derive(Debug)]
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Vec<Expense>,
    unsaved: bool,
}

impl ExpenseStore {
    /// Empty store bound to `path`; nothing is read or written.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expenses: Vec::new(),
            unsaved: false,
        }
    }

    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        match codec::read_file(&path)? {
            Some(expenses) => {
                info!("Loaded {} expenses from {}", expenses.len(), path.display());
                Ok(Self {
                    path,
                    expenses,
                    unsaved: false,
                })
            }
            None => {
                info!("No expenses file at {}, starting empty", path.display());
                Ok(Self::empty(path))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, expense: Expense) {
        self.expenses.push(expense);
        self.unsaved = true;
    }

    /// All expenses in insertion order.
    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// True when records were appended since the last successful save.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Overwrite the backing file with the current list.
    pub fn save(&mut self) -> Result<(), StoreError> {
        codec::write_file(&self.path, &self.expenses)?;
        self.unsaved = false;
        debug!("Saved {} expenses to {}", self.expenses.len(), self.path.display());
        Ok(())
    }
}

/// SmartTable Rows
///
/// A `Row` is a shared handle to a fixed-arity list of cells. Cloning a
/// `Row` clones the handle, not the cells, so the same logical row can sit
/// in several stores at once. Identity is the allocation: two handles are
/// the same row iff `Row::ptr_eq` says so, regardless of cell contents.
///
/// Rows keep a list of non-owning observers. Whoever holds a row and wants
/// to hear about edits registers itself with `Row::observe`; dropped
/// observers are pruned whenever the row registers or notifies.

use crate::value::CellValue;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives cell edits for rows it has registered against.
pub trait RowObserver {
    /// Called after `column` of `row` has been overwritten.
    fn cell_changed(&self, row: &Row, column: usize);
}

struct RowData {
    cells: RefCell<Vec<CellValue>>,
    observers: RefCell<Vec<Weak<dyn RowObserver>>>,
}

/// Shared, identity-carrying row handle.
#[derive(Clone)]
pub struct Row {
    data: Rc<RowData>,
}

impl Row {
    /// Allocates a fresh row. Every call produces a distinct identity.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Row {
            data: Rc::new(RowData {
                cells: RefCell::new(cells),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn from_values<V: Into<CellValue>>(values: Vec<V>) -> Self {
        Row::new(values.into_iter().map(Into::into).collect())
    }

    /// Number of cells. Fixed for the lifetime of the row.
    pub fn len(&self) -> usize {
        self.data.cells.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, column: usize) -> Option<CellValue> {
        self.data.cells.borrow().get(column).cloned()
    }

    /// Display text of a cell, or None when `column` is out of range.
    pub fn text(&self, column: usize) -> Option<String> {
        self.data.cells.borrow().get(column).map(|v| v.to_string())
    }

    /// Run `f` against a borrowed cell without cloning it.
    pub fn with_cell<R>(&self, column: usize, f: impl FnOnce(&CellValue) -> R) -> Option<R> {
        self.data.cells.borrow().get(column).map(f)
    }

    pub fn values(&self) -> Vec<CellValue> {
        self.data.cells.borrow().clone()
    }

    /// Overwrite one cell and notify every live observer.
    ///
    /// Returns false without touching anything if `column` is out of range;
    /// arity never changes.
    pub fn set(&self, column: usize, value: CellValue) -> bool {
        {
            let mut cells = self.data.cells.borrow_mut();
            match cells.get_mut(column) {
                Some(cell) => *cell = value,
                None => return false,
            }
        }
        self.notify(column);
        true
    }

    /// Register an observer. Registering the same observer twice is a no-op.
    pub fn observe(&self, observer: Weak<dyn RowObserver>) {
        let mut observers = self.data.observers.borrow_mut();
        observers.retain(|o| o.strong_count() > 0);
        if !observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            observers.push(observer);
        }
    }

    pub fn unobserve(&self, observer: &Weak<dyn RowObserver>) {
        self.data
            .observers
            .borrow_mut()
            .retain(|o| !Weak::ptr_eq(o, observer));
    }

    /// Number of observers still alive.
    pub fn observer_count(&self) -> usize {
        self.data
            .observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// Registered entries, dead or alive.
    pub(crate) fn observer_slots(&self) -> usize {
        self.data.observers.borrow().len()
    }

    pub fn ptr_eq(&self, other: &Row) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    fn notify(&self, column: usize) {
        // Observers may read this row back, so no borrow is held while they run.
        let live: Vec<Rc<dyn RowObserver>> = {
            let mut observers = self.data.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.cell_changed(self, column);
        }
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Row").field(&*self.data.cells.borrow()).finish()
    }
}

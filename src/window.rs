/// SmartTable Materialised Window
///
/// The window is the prefix of a store's filtered view that a display has
/// been given. It only changes through the owning store; everything that
/// happens to it is published as a `WindowChange`.
///
/// Changes are buffered in the window's changeset only while nobody is
/// subscribed. Attaching the first listener clears the buffer, and from then
/// on listeners are the only consumers until the last one unsubscribes.
///
/// A window is also a `RowObserver`: it hears about edits to any row it was
/// registered against and, if that row is currently materialised, reports a
/// `CellChanged` at the row's present position.

use crate::changeset::{Changeset, WindowChange};
use crate::row::{Row, RowObserver};
use std::cell::RefCell;
use std::rc::Rc;

/// Callback invoked with each change after it is recorded.
pub type ChangeListener = Rc<dyn Fn(&WindowChange)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct Window {
    rows: Vec<Row>,
    page_size: usize,
    changeset: Changeset,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
}

impl Window {
    pub fn new(page_size: usize) -> Self {
        Window {
            rows: Vec::new(),
            page_size,
            changeset: Changeset::new(),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&Row> {
        self.rows.get(position)
    }

    /// Current window position of `row`, by identity.
    pub fn position_of(&self, row: &Row) -> Option<usize> {
        self.rows.iter().position(|r| r.ptr_eq(row))
    }

    pub fn changeset(&self) -> &Changeset {
        &self.changeset
    }

    pub(crate) fn changeset_mut(&mut self) -> &mut Changeset {
        &mut self.changeset
    }

    /// Rematerialise the window as `view[..size]`.
    pub(crate) fn materialize(&mut self, view: &[Row], size: usize) {
        debug_assert!(size <= view.len());
        self.rows.clear();
        self.rows.extend_from_slice(&view[..size]);
    }

    /// Append `view[len..new_len]` to the window.
    pub(crate) fn extend_from(&mut self, view: &[Row], new_len: usize) {
        debug_assert!(new_len <= view.len());
        let start = self.rows.len();
        self.rows.extend_from_slice(&view[start..new_len]);
    }

    pub(crate) fn subscribe(&mut self, listener: ChangeListener) -> ListenerId {
        if self.listeners.is_empty() {
            self.changeset.clear();
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn record(&mut self, change: WindowChange) -> Vec<ChangeListener> {
        if self.listeners.is_empty() {
            self.changeset.push(change);
        }
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Record or dispatch `change`. Listeners run with the window released, so
/// a listener may read back through the store.
pub(crate) fn emit(window: &RefCell<Window>, change: WindowChange) {
    let listeners = window.borrow_mut().record(change);
    for listener in listeners {
        listener(&change);
    }
}

impl RowObserver for RefCell<Window> {
    fn cell_changed(&self, row: &Row, column: usize) {
        let position = self.borrow().position_of(row);
        if let Some(position) = position {
            emit(self, WindowChange::CellChanged { row: position, column });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    fn rows(n: usize) -> Vec<Row> {
        (0..n).map(|i| Row::from_values(vec![i as i64])).collect()
    }

    #[test]
    fn test_materialize_and_extend() {
        let view = rows(10);
        let mut window = Window::new(4);
        window.materialize(&view, 4);
        assert_eq!(window.len(), 4);
        window.extend_from(&view, 7);
        assert_eq!(window.len(), 7);
        assert!(window.row(6).unwrap().ptr_eq(&view[6]));
        assert_eq!(window.position_of(&view[5]), Some(5));
        assert_eq!(window.position_of(&view[8]), None);
    }

    #[test]
    fn test_changes_buffer_only_without_listeners() {
        let window = Rc::new(RefCell::new(Window::new(4)));
        emit(&window, WindowChange::RangeInserted { start: 0, end: 4 });
        assert_eq!(window.borrow().changeset().len(), 1);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = window
            .borrow_mut()
            .subscribe(Rc::new(move |c: &WindowChange| sink.borrow_mut().push(*c)));
        assert!(window.borrow().changeset().is_empty());
        assert_eq!(window.borrow().changeset().generation(), 1);

        for _ in 0..1000 {
            emit(&window, WindowChange::CellChanged { row: 1, column: 0 });
        }
        assert_eq!(seen.borrow().len(), 1000);
        assert!(window.borrow().changeset().is_empty());

        assert!(window.borrow_mut().unsubscribe(id));
        assert!(!window.borrow().has_listeners());
        emit(&window, WindowChange::LayoutChanged);
        assert_eq!(seen.borrow().len(), 1000);
        assert_eq!(window.borrow().changeset().len(), 1);
    }

    #[test]
    fn test_cell_change_uses_current_position() {
        let view = rows(5);
        let window = Rc::new(RefCell::new(Window::new(5)));
        window.borrow_mut().materialize(&view[2..], 3);

        let observer: Rc<dyn RowObserver> = window.clone();
        for row in &view {
            row.observe(Rc::downgrade(&observer));
        }

        view[3].set(0, CellValue::Int(99));
        view[0].set(0, CellValue::Int(42));

        let changes = window.borrow_mut().changeset_mut().drain();
        assert_eq!(changes, vec![WindowChange::CellChanged { row: 1, column: 0 }]);
    }
}

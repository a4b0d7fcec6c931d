/// SmartTable Paged Row Store
///
/// A `PagedRowStore` owns three things:
///
/// - the authoritative rows, in the order they were supplied
/// - the filtered view: authoritative rows narrowed by the column filters
///   and optionally sorted
/// - the window: the prefix of the filtered view handed to the display
///
/// The window starts at one page and grows a page at a time on request.
/// When the filtered view is replaced the window snaps back to at most one
/// page and the size difference is published as one contiguous range.
///
/// # Examples
///
/// ```
/// use smarttable::{PagedRowStore, Row, Schema, StoreConfig, WindowChange};
///
/// let schema = Schema::new(vec!["Num"]);
/// let rows: Vec<Row> = (0..250).map(|i| Row::from_values(vec![i])).collect();
/// let mut store = PagedRowStore::new(schema, rows, StoreConfig::default()).unwrap();
///
/// assert_eq!(store.row_count(), 100);
/// assert!(store.can_grow());
/// assert_eq!(store.grow(), Some(WindowChange::RangeInserted { start: 100, end: 200 }));
/// assert_eq!(store.grow(), Some(WindowChange::RangeInserted { start: 200, end: 250 }));
/// assert_eq!(store.grow(), None);
///
/// store.apply_filter(0, "<10").unwrap();
/// assert_eq!(store.filtered_len(), 10);
/// assert_eq!(store.row_count(), 10);
/// ```

use crate::changeset::WindowChange;
use crate::column::Schema;
use crate::config::StoreConfig;
use crate::debounce::FilterDebouncer;
use crate::error::{FilterError, StoreError};
use crate::filter::{FilterSet, RowFilterEngine};
use crate::row::{Row, RowObserver};
use crate::sort::{SortEngine, SortKey, SortPolicy};
use crate::value::CellValue;
use crate::window::{emit, ChangeListener, ListenerId, Window};
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Instant;

pub struct PagedRowStore {
    schema: Schema,
    rows: Vec<Row>,
    view: Vec<Row>,
    window: Rc<RefCell<Window>>,
    filters: FilterSet,
    debouncer: FilterDebouncer,
    sort_key: Option<SortKey>,
    config: StoreConfig,
    /// Number of times the filtered view has been rebuilt from the filters
    filter_generation: u64,
}

impl PagedRowStore {
    /// Build a store over `rows`. Every row must have one cell per column.
    ///
    /// The rows are shared, not copied: the store registers itself as an
    /// observer on each of them, so edits made anywhere reach this window.
    pub fn new(schema: Schema, rows: Vec<Row>, config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        if let Some(bad) = rows.iter().find(|r| r.len() != schema.len()) {
            return Err(StoreError::ArityMismatch {
                expected: schema.len(),
                found: bad.len(),
            });
        }

        let columns = schema.len();
        let window = Rc::new(RefCell::new(Window::new(config.page_size)));
        let initial = rows.len().min(config.page_size);
        window.borrow_mut().materialize(&rows, initial);

        let store = PagedRowStore {
            schema,
            view: rows.clone(),
            rows,
            window,
            filters: FilterSet::new(columns),
            debouncer: FilterDebouncer::new(columns, config.filter_delay()),
            sort_key: None,
            config,
            filter_generation: 0,
        };
        store.observe_rows(&store.rows);
        debug!(
            "created store with {} rows, {} columns, window {}",
            store.rows.len(),
            columns,
            initial
        );
        Ok(store)
    }

    fn observer(&self) -> Weak<dyn RowObserver> {
        let observer: Rc<dyn RowObserver> = self.window.clone();
        Rc::downgrade(&observer)
    }

    fn observe_rows(&self, rows: &[Row]) {
        let observer = self.observer();
        for row in rows {
            row.observe(observer.clone());
        }
    }

    // ----- display boundary -----

    /// Number of rows in the window.
    pub fn row_count(&self) -> usize {
        self.window.borrow().len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn cell_value(&self, row: usize, column: usize) -> Option<CellValue> {
        self.window.borrow().row(row).and_then(|r| r.get(column))
    }

    /// Display text of a window cell.
    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        self.window.borrow().row(row).and_then(|r| r.text(column))
    }

    pub fn header_name(&self, column: usize) -> Option<&str> {
        self.schema.name(column)
    }

    pub fn is_editable(&self, column: usize) -> bool {
        self.schema.is_editable(column)
    }

    pub fn set_editable(&mut self, column: usize, editable: bool) {
        self.schema.set_editable(column, editable);
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Row handle at a window position.
    pub fn window_row(&self, position: usize) -> Option<Row> {
        self.window.borrow().row(position).cloned()
    }

    /// Current window position of `row`, by identity.
    pub fn position_of(&self, row: &Row) -> Option<usize> {
        self.window.borrow().position_of(row)
    }

    /// Size of the filtered view ("Row Count").
    pub fn filtered_len(&self) -> usize {
        self.view.len()
    }

    /// Size of the authoritative row set.
    pub fn total_len(&self) -> usize {
        self.rows.len()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn filtered_view(&self) -> &[Row] {
        &self.view
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Register a listener for every future window change.
    ///
    /// While any listener is registered, changes are not buffered for
    /// `drain_changes`; subscribing discards whatever was still buffered.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&WindowChange) + 'static,
    {
        let listener: ChangeListener = Rc::new(listener);
        self.window.borrow_mut().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.window.borrow_mut().unsubscribe(id)
    }

    /// Changes buffered since the last drain, while nobody was subscribed.
    pub fn pending_changes(&self) -> Vec<WindowChange> {
        self.window.borrow().changeset().changes().to_vec()
    }

    pub fn drain_changes(&self) -> Vec<WindowChange> {
        self.window.borrow_mut().changeset_mut().drain()
    }

    pub fn changeset_generation(&self) -> u64 {
        self.window.borrow().changeset().generation()
    }

    // ----- paging -----

    /// Replace the filtered view.
    ///
    /// The window becomes `view[..min(page_size, view.len())]`. The size
    /// difference is published as a single `RangeInserted` or `RangeRemoved`
    /// at the old boundary, followed by `LayoutChanged` if any previously
    /// materialised position is still present.
    ///
    /// Rows outside the authoritative set are accepted: the store observes
    /// them and allows edits to them while they stay in the view.
    pub fn set_filtered_view(&mut self, view: Vec<Row>) {
        self.observe_rows(&view);
        self.replace_view(view);
    }

    fn replace_view(&mut self, view: Vec<Row>) {
        self.view = view;

        let old = self.row_count();
        let new = self.view.len().min(self.config.page_size);
        self.window.borrow_mut().materialize(&self.view, new);

        debug!(
            "filtered view now {} rows, window {} -> {}",
            self.view.len(),
            old,
            new
        );
        if let Some(change) = WindowChange::resize(old, new) {
            emit(&self.window, change);
        }
        if old.min(new) > 0 {
            emit(&self.window, WindowChange::LayoutChanged);
        }
    }

    /// True iff rows of the filtered view remain outside the window.
    pub fn can_grow(&self) -> bool {
        self.row_count() < self.view.len()
    }

    /// Extend the window by up to one page.
    ///
    /// Returns the published insert range, or None when nothing was left.
    pub fn grow(&mut self) -> Option<WindowChange> {
        let current = self.row_count();
        let available = self.view.len().saturating_sub(current);
        let added = available.min(self.config.page_size);
        if added == 0 {
            return None;
        }

        let new_len = current + added;
        self.window.borrow_mut().extend_from(&self.view, new_len);
        let change = WindowChange::RangeInserted {
            start: current,
            end: new_len,
        };
        debug!("window grew {} -> {}", current, new_len);
        emit(&self.window, change);
        Some(change)
    }

    // ----- editing -----

    /// Overwrite one cell of `row`.
    ///
    /// Every store holding this row is notified, each at the row's own
    /// window position. Only the column index is validated; the value is
    /// stored as given.
    pub fn set_cell_value(
        &mut self,
        row: &Row,
        column: usize,
        value: CellValue,
    ) -> Result<(), StoreError> {
        if column >= self.schema.len() {
            warn!("rejected edit of column {} (have {})", column, self.schema.len());
            return Err(StoreError::ColumnOutOfRange {
                column,
                count: self.schema.len(),
            });
        }
        if !self.holds(row) {
            warn!("rejected edit of a row this store does not hold");
            return Err(StoreError::RowNotInStore);
        }
        row.set(column, value);
        Ok(())
    }

    /// True if `row` is authoritative or part of the current filtered view.
    fn holds(&self, row: &Row) -> bool {
        self.rows.iter().any(|r| r.ptr_eq(row)) || self.view.iter().any(|r| r.ptr_eq(row))
    }

    /// Overwrite a cell addressed by window position.
    pub fn set_cell_value_at(
        &mut self,
        position: usize,
        column: usize,
        value: CellValue,
    ) -> Result<(), StoreError> {
        let row = self
            .window_row(position)
            .ok_or_else(|| StoreError::RowOutOfRange {
                row: position,
                count: self.row_count(),
            })?;
        self.set_cell_value(&row, column, value)
    }

    // ----- filtering -----

    /// Record a keystroke in a column's filter box.
    ///
    /// Nothing is re-filtered until `poll_filters` runs after the column
    /// has been quiet for the configured delay.
    pub fn set_filter_text(
        &mut self,
        column: usize,
        text: &str,
        now: Instant,
    ) -> Result<(), StoreError> {
        if !self.debouncer.text_changed(column, text, now) {
            return Err(StoreError::ColumnOutOfRange {
                column,
                count: self.schema.len(),
            });
        }
        Ok(())
    }

    /// When the next pending filter will be ready, for scheduling a timer.
    pub fn next_filter_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    pub fn has_pending_filters(&self) -> bool {
        self.debouncer.next_deadline().is_some()
    }

    /// Apply every filter whose delay has elapsed at `now`, re-filtering
    /// once if any did.
    ///
    /// Returns the columns whose new text failed to parse; those columns
    /// match everything until corrected.
    pub fn poll_filters(&mut self, now: Instant) -> Vec<FilterError> {
        let fired = self.debouncer.poll(now);
        if fired.is_empty() {
            return Vec::new();
        }

        let errors: Vec<FilterError> = fired
            .iter()
            .filter_map(|(column, text)| self.update_spec(*column, text))
            .collect();
        self.refilter();
        errors
    }

    /// Set a column's filter and re-filter immediately, bypassing the delay.
    ///
    /// A pending debounced text for the column is discarded. The inner
    /// `Option` carries the column-scoped parse error, if any.
    pub fn apply_filter(
        &mut self,
        column: usize,
        text: &str,
    ) -> Result<Option<FilterError>, StoreError> {
        if column >= self.schema.len() {
            return Err(StoreError::ColumnOutOfRange {
                column,
                count: self.schema.len(),
            });
        }
        self.debouncer.cancel(column);
        let error = self.update_spec(column, text);
        self.refilter();
        Ok(error)
    }

    fn update_spec(&mut self, column: usize, text: &str) -> Option<FilterError> {
        match self.filters.set_text(column, text)? {
            Ok(()) => None,
            Err(source) => {
                let name = self.schema.name(column).unwrap_or_default().to_string();
                warn!("invalid filter for column {} ('{}'): {}", column, name, source);
                Some(FilterError::InvalidColumnFilter {
                    column,
                    name,
                    source: Box::new(source),
                })
            }
        }
    }

    /// The current parse error for a column's filter, if its text is invalid.
    pub fn filter_error(&self, column: usize) -> Option<FilterError> {
        let source = self.filters.get(column)?.error()?.clone();
        Some(FilterError::InvalidColumnFilter {
            column,
            name: self.schema.name(column).unwrap_or_default().to_string(),
            source: Box::new(source),
        })
    }

    /// Current filter text of a column (as applied, not as pending).
    pub fn filter_text(&self, column: usize) -> Option<&str> {
        self.filters.get(column).map(|s| s.text())
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Number of times the filtered view has been rebuilt from the filters.
    pub fn filter_generation(&self) -> u64 {
        self.filter_generation
    }

    /// Reset every column filter, drop any pending keystrokes and the active
    /// sort, and restore the full row set in authoritative order.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.debouncer.cancel_all();
        self.sort_key = None;
        self.refilter();
    }

    /// Rebuild the filtered view from the authoritative rows.
    pub fn refilter(&mut self) {
        let mut view = RowFilterEngine::apply(&self.rows, &self.filters);
        match (self.config.sort_policy, self.sort_key) {
            (SortPolicy::Reapply, Some(key)) => SortEngine::sort(&mut view, key),
            (SortPolicy::Reset, Some(_)) => self.sort_key = None,
            (_, None) => {}
        }
        self.filter_generation += 1;
        // Every row here came from `self.rows`, which is already observed.
        self.replace_view(view);
    }

    // ----- sorting -----

    /// Sort the filtered view. The window keeps its size; its content is
    /// rematerialised and `LayoutChanged` is published.
    pub fn sort(&mut self, key: SortKey) -> Result<(), StoreError> {
        if key.column >= self.schema.len() {
            return Err(StoreError::ColumnOutOfRange {
                column: key.column,
                count: self.schema.len(),
            });
        }
        SortEngine::sort(&mut self.view, key);
        self.sort_key = Some(key);

        let size = self.row_count();
        self.window.borrow_mut().materialize(&self.view, size);
        if size > 0 {
            emit(&self.window, WindowChange::LayoutChanged);
        }
        Ok(())
    }

    pub fn sort_by(&mut self, column: usize, ascending: bool) -> Result<(), StoreError> {
        self.sort(SortKey::new(column, ascending))
    }

    pub fn sort_key(&self) -> Option<SortKey> {
        self.sort_key
    }
}

impl Drop for PagedRowStore {
    fn drop(&mut self) {
        let observer = self.observer();
        for row in self.rows.iter().chain(self.view.iter()) {
            row.unobserve(&observer);
        }
    }
}

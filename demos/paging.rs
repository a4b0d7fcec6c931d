/// Paging Example
///
/// This example demonstrates:
/// - Building a store over a thousand rows with a page size of 100
/// - Typing a filter in bursts and applying it after the quiet period
/// - Sorting the filtered rows
/// - Growing the window page by page, the way a view does near the scroll end
///
/// Run with `RUST_LOG=debug cargo run --example paging` to see the store's log.

use smarttable::{PagedRowStore, Row, Schema, SortKey, StoreConfig, WindowChange};
use std::time::{Duration, Instant};

fn main() {
    env_logger::init();
    println!("=== SmartTable Paging Example ===\n");

    // 1. Build the store
    println!("1. Creating store...");
    let rows: Vec<Row> = (0..1000i64)
        .map(|i| Row::from_values(vec![(i * 37) % 201 - 100, (i * 53) % 201 - 100, (i * 71) % 201 - 100]))
        .collect();
    let config = StoreConfig::default().with_page_size(100);
    let mut store = PagedRowStore::new(Schema::new(vec!["Num1", "Num2", "Num3"]), rows, config)
        .expect("rows match the schema");

    store.subscribe(|change: &WindowChange| match change {
        WindowChange::RangeInserted { start, end } => println!("   + rows {}..{}", start, end),
        WindowChange::RangeRemoved { start, end } => println!("   - rows {}..{}", start, end),
        WindowChange::CellChanged { row, column } => println!("   * cell ({}, {})", row, column),
        WindowChange::LayoutChanged => println!("   ~ layout"),
    });
    println!("   {} rows, window {}\n", store.total_len(), store.row_count());

    // 2. Type a filter into the Num1 box
    println!("2. Typing '>=0&&<50' into Num1...");
    let start = Instant::now();
    for (i, text) in [">", ">=", ">=0", ">=0&", ">=0&&", ">=0&&<", ">=0&&<5", ">=0&&<50"]
        .iter()
        .enumerate()
    {
        let at = start + Duration::from_millis(120 * i as u64);
        store.set_filter_text(0, text, at).expect("column exists");
        store.poll_filters(at);
    }
    if let Some(deadline) = store.next_filter_deadline() {
        for error in store.poll_filters(deadline) {
            println!("   {}", error);
        }
    }
    println!(
        "   re-filtered {} time(s), {} rows match\n",
        store.filter_generation(),
        store.filtered_len()
    );

    // 3. Sort by Num2 descending
    println!("3. Sorting by Num2 descending...");
    store.sort(SortKey::descending(1)).expect("column exists");
    for pos in 0..3 {
        println!(
            "   {:>5} {:>5} {:>5}",
            store.cell_text(pos, 0).unwrap_or_default(),
            store.cell_text(pos, 1).unwrap_or_default(),
            store.cell_text(pos, 2).unwrap_or_default()
        );
    }
    println!();

    // 4. Fetch more until exhausted
    println!("4. Growing the window...");
    while store.can_grow() {
        store.grow();
    }
    println!("   window {} of {}\n", store.row_count(), store.filtered_len());

    // 5. Clear filters
    println!("5. Clearing filters...");
    store.clear_filters();
    println!("   {} rows, window {}", store.filtered_len(), store.row_count());

    println!("\n=== Example Complete ===");
}

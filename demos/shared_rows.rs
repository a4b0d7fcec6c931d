/// Shared Rows Example
///
/// Two stores are built over the same rows, one of them sorted. An edit made
/// through either store is reported by both, each at the position the row
/// occupies in its own window.

use smarttable::{CellValue, PagedRowStore, Row, Schema, StoreConfig, WindowChange};

fn main() {
    env_logger::init();
    println!("=== SmartTable Shared Rows Example ===\n");

    let mut schema = Schema::new(vec!["First Name", "Last Name", "Email", "Age"]);
    schema.set_all_editable(true);

    let rows = vec![
        Row::from_values(vec!["John", "Doe", "john.doe@example.com", "30"]),
        Row::from_values(vec!["Jane", "Smith", "jane.smith@example.com", "50"]),
        Row::new(vec![
            CellValue::from("Michael"),
            CellValue::from("Johnson"),
            CellValue::from("michael.johnson@example.com"),
            CellValue::Int(60),
        ]),
    ];

    let mut by_entry = PagedRowStore::new(schema.clone(), rows.clone(), StoreConfig::default())
        .expect("rows match the schema");
    let mut by_age = PagedRowStore::new(schema, rows.clone(), StoreConfig::default())
        .expect("rows match the schema");
    by_age.sort_by(3, false).expect("column exists");

    by_entry.subscribe(|c: &WindowChange| println!("   entry order: {:?}", c));
    by_age.subscribe(|c: &WindowChange| println!("   age order:   {:?}", c));

    println!("Editing Jane's age through the first table...");
    by_entry
        .set_cell_value(&rows[1], 3, CellValue::from("51"))
        .expect("valid edit");

    println!("\nEditing the oldest person's email through the second table...");
    by_age
        .set_cell_value_at(0, 2, CellValue::from("mj@example.com"))
        .expect("valid edit");

    println!("\nFiltering the first table by age '>=50'...");
    by_entry.apply_filter(3, ">=50").expect("column exists");
    for pos in 0..by_entry.row_count() {
        println!(
            "   {} {} ({})",
            by_entry.cell_text(pos, 0).unwrap_or_default(),
            by_entry.cell_text(pos, 1).unwrap_or_default(),
            by_entry.cell_text(pos, 3).unwrap_or_default()
        );
    }

    println!("\n=== Example Complete ===");
}

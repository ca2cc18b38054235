pub mod report;
pub mod summary;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// A two-column table in the house style.
pub(crate) fn two_column_table(left: &str, right: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![left, right]);
    table
}

pub(crate) fn print_section(title: &str, table: &Table) {
    println!("\n== {title} ==");
    println!("{table}");
}

//! Output rendering for the `trucks` binary.

use crate::collection::Collection;
use crate::config::OutputFormat;
use crate::error::Result;
use crate::truck::Truck;
use crate::validation::ValidationErrors;

const HEADERS: [&str; 4] = ["Make", "Id", "Is Available", "Purchase Date"];

/// Render the collection in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(collection: &Collection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => collection.serialize(),
        OutputFormat::Table => Ok(render_table(collection.as_slice())),
        OutputFormat::Plain => Ok(render_plain(collection.as_slice())),
    }
}

/// One truck per line: `ID  Make  available|unavailable  date`.
#[must_use]
pub fn render_plain(trucks: &[Truck]) -> String {
    trucks
        .iter()
        .map(|truck| {
            format!(
                "{}  {}  {}  {}",
                truck.id,
                truck.make,
                if truck.is_available {
                    "available"
                } else {
                    "unavailable"
                },
                truck.purchase_date_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Aligned table with a header row, in insertion order.
#[must_use]
pub fn render_table(trucks: &[Truck]) -> String {
    if trucks.is_empty() {
        return "No trucks in inventory.".to_string();
    }

    let rows: Vec<[String; 4]> = trucks
        .iter()
        .map(|truck| {
            [
                truck.make.to_string(),
                truck.id.to_string(),
                truck.availability_label().to_string(),
                truck.purchase_date_label(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.as_slice(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.as_slice(), &widths);
    for row in &rows {
        push_row(&mut out, row.as_slice(), &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// One line per rejected field, as `field: message`.
#[must_use]
pub fn render_field_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| format!("  {}: {error}", error.field()))
        .collect::<Vec<_>>()
        .join("\n")
}

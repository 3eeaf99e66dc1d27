//! Delimited text output
//!
//! Comma separated, every row (header included) ends with `\n`. A cell is quoted
//! only when it contains a comma, a double quote or a line feed; quotes inside
//! are doubled. Everything else is written verbatim.

use super::wide::WideTable;
use std::borrow::Cow;

pub const FIELD_SEPARATOR: char = ',';
pub const ROW_SEPARATOR: char = '\n';

/// Escape a single cell
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([FIELD_SEPARATOR, '"', ROW_SEPARATOR]) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

fn write_row<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.push_str(&escape_cell(cell.as_ref()));
    }
}

impl WideTable {
    /// Serialize the header row followed by every data row
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_row(&mut out, &self.headers);
        out.push(ROW_SEPARATOR);
        for row in &self.rows {
            write_row(&mut out, row);
            out.push(ROW_SEPARATOR);
        }
        out
    }
}

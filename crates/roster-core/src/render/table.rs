// ABOUTME: Renders a slice of student records as a fixed-width, left-justified text table.
// ABOUTME: Header row, a dash rule as wide as all columns together, then one row per record.

use std::fmt::Write;

use crate::record::{SCORE_COUNT, StudentRecord};

const NAME_WIDTH: usize = 10;
const ID_WIDTH: usize = 12;
const DEPARTMENT_WIDTH: usize = 12;
const MAJOR_WIDTH: usize = 10;
const SCORE_WIDTH: usize = 7;
const TOTAL_WIDTH: usize = 6;

/// Sum of all column widths; also the length of the separator rule.
pub const TABLE_WIDTH: usize = NAME_WIDTH
    + ID_WIDTH
    + DEPARTMENT_WIDTH
    + MAJOR_WIDTH
    + SCORE_COUNT * SCORE_WIDTH
    + TOTAL_WIDTH;

/// Render `records` as a table. Every line, including the last, ends with a
/// newline. Values wider than their column are not truncated.
pub fn render_table(records: &[StudentRecord]) -> String {
    let mut out = String::new();

    write!(
        out,
        "{:<NAME_WIDTH$}{:<ID_WIDTH$}{:<DEPARTMENT_WIDTH$}{:<MAJOR_WIDTH$}",
        "Name", "ID", "Department", "Major"
    )
    .unwrap();
    for course in 1..=SCORE_COUNT {
        write!(out, "{:<SCORE_WIDTH$}", format!("Score{}", course)).unwrap();
    }
    writeln!(out, "{:<TOTAL_WIDTH$}", "Total").unwrap();

    writeln!(out, "{}", "-".repeat(TABLE_WIDTH)).unwrap();

    for record in records {
        write!(
            out,
            "{:<NAME_WIDTH$}{:<ID_WIDTH$}{:<DEPARTMENT_WIDTH$}{:<MAJOR_WIDTH$}",
            record.name(),
            record.id(),
            record.department(),
            record.major()
        )
        .unwrap();
        for score in record.scores() {
            write!(out, "{:<SCORE_WIDTH$}", score).unwrap();
        }
        writeln!(out, "{:<TOTAL_WIDTH$}", record.total_score()).unwrap();
    }

    out
}

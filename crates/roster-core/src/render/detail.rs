// ABOUTME: Renders a single student record as labelled lines, including total and average score.
// ABOUTME: Used by the menu's find action to show one student at a time.

use std::fmt::Write;

use crate::record::StudentRecord;

pub fn render_detail(record: &StudentRecord) -> String {
    let mut out = String::new();

    writeln!(out, "Name: {}", record.name()).unwrap();
    writeln!(out, "ID: {}", record.id()).unwrap();
    writeln!(out, "Department: {}", record.department()).unwrap();
    writeln!(out, "Major: {}", record.major()).unwrap();
    let scores: Vec<String> = record.scores().iter().map(|s| s.to_string()).collect();
    writeln!(out, "Scores: {}", scores.join(" ")).unwrap();
    writeln!(out, "Total Score: {}", record.total_score()).unwrap();
    writeln!(out, "Average Score: {}", record.average_score()).unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_lists_every_field() {
        let record = StudentRecord::new(
            "Alice".to_string(),
            1001,
            "CS".to_string(),
            "AI".to_string(),
            [90, 80, 70, 60, 50],
        );

        assert_eq!(
            render_detail(&record),
            "Name: Alice\n\
             ID: 1001\n\
             Department: CS\n\
             Major: AI\n\
             Scores: 90 80 70 60 50\n\
             Total Score: 350\n\
             Average Score: 70\n"
        );
    }

    #[test]
    fn fractional_average_is_printed_short() {
        let record = StudentRecord::new(
            "Bob".to_string(),
            2,
            "EE".to_string(),
            "RF".to_string(),
            [70, 70, 70, 70, 72],
        );
        assert!(render_detail(&record).ends_with("Average Score: 70.4\n"));
    }
}

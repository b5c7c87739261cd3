// ABOUTME: Whitespace-delimited flat-file codec for student records, one record per line.
// ABOUTME: Decoding is lenient: it stops quietly at the first incomplete or malformed record.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use roster_core::{SCORE_COUNT, StudentRecord};
use thiserror::Error;

/// Tokens per record: name, id, department, major, then the scores.
const FIELDS_PER_RECORD: usize = 4 + SCORE_COUNT;

/// Errors that can occur while reading or writing the backing file.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unable to open file {} for reading: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("unable to open file {} for writing: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Serialize records as `name id department major s1 s2 s3 s4 s5`, one
/// line each, in store order.
pub fn encode(records: &[StudentRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_line(record));
        out.push('\n');
    }
    out
}

/// Whether a text field survives a round trip through the file: it must be
/// a single non-empty token.
pub fn is_storable(field: &str) -> bool {
    !field.is_empty() && !field.contains(char::is_whitespace)
}

fn encode_line(record: &StudentRecord) -> String {
    let text_fields = [record.name(), record.department(), record.major()];
    if !text_fields.iter().all(|f| is_storable(f)) {
        tracing::warn!(
            id = record.id(),
            "record has an empty or multi-word text field; it and every later record will not load back"
        );
    }
    let mut fields = vec![
        record.name().to_string(),
        record.id().to_string(),
        record.department().to_string(),
        record.major().to_string(),
    ];
    fields.extend(record.scores().iter().map(|s| s.to_string()));
    fields.join(" ")
}

/// Parse whitespace-delimited tokens into records, nine tokens at a time.
///
/// Line breaks carry no meaning; only token order does. Parsing stops at
/// the first group that is short or whose id or scores are not integers,
/// and everything from there on is dropped.
pub fn decode(text: &str) -> Vec<StudentRecord> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut records = Vec::new();

    for group in tokens.chunks(FIELDS_PER_RECORD) {
        match decode_group(group) {
            Some(record) => records.push(record),
            None => {
                let dropped = tokens.len() - records.len() * FIELDS_PER_RECORD;
                tracing::warn!(
                    dropped_tokens = dropped,
                    "stopping at malformed record after {} good records",
                    records.len()
                );
                break;
            }
        }
    }

    records
}

fn decode_group(group: &[&str]) -> Option<StudentRecord> {
    let [name, id, department, major, scores @ ..] = group else {
        return None;
    };
    if scores.len() != SCORE_COUNT {
        return None;
    }
    let id: i64 = id.parse().ok()?;

    let mut parsed = [0i32; SCORE_COUNT];
    for (slot, token) in parsed.iter_mut().zip(scores) {
        *slot = token.parse().ok()?;
    }

    Some(StudentRecord::new(
        name.to_string(),
        id,
        department.to_string(),
        major.to_string(),
        parsed,
    ))
}

/// Read and decode the backing file. Fails only when the file cannot be
/// read at all; malformed content is handled by [`decode`].
pub fn load(path: &Path) -> Result<Vec<StudentRecord>, CodecError> {
    let bytes = fs::read(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = decode(&String::from_utf8_lossy(&bytes));
    tracing::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Overwrite the backing file with `records`. The file is truncated and
/// rewritten in place.
pub fn save(path: &Path, records: &[StudentRecord]) -> Result<(), CodecError> {
    let write_err = |source: io::Error| CodecError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(encode(records).as_bytes())
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    tracing::info!("saved {} records to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, id: i64, scores: [i32; SCORE_COUNT]) -> StudentRecord {
        StudentRecord::new(name.to_string(), id, "CS".to_string(), "AI".to_string(), scores)
    }

    #[test]
    fn encode_writes_one_line_per_record() {
        let text = encode(&[
            record("Alice", 1001, [90, 80, 70, 60, 50]),
            record("Bob", 7, [-1, 0, 1, 2, 3]),
        ]);
        assert_eq!(
            text,
            "Alice 1001 CS AI 90 80 70 60 50\nBob 7 CS AI -1 0 1 2 3\n"
        );
    }

    #[test]
    fn storable_fields_are_single_tokens() {
        assert!(is_storable("Alice"));
        assert!(is_storable("O'Neil-Ray"));
        assert!(!is_storable(""));
        assert!(!is_storable("Mary Ann"));
        assert!(!is_storable("CS\t"));
    }

    #[test]
    fn multi_word_name_breaks_every_later_record() {
        let text = encode(&[
            record("Mary Ann", 1, [1, 2, 3, 4, 5]),
            record("Bob", 2, [1, 1, 1, 1, 1]),
        ]);
        assert_eq!(
            text,
            "Mary Ann 1 CS AI 1 2 3 4 5\nBob 2 CS AI 1 1 1 1 1\n"
        );
        assert!(decode(&text).is_empty());
    }

    #[test]
    fn encode_empty_is_empty() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn decode_computes_totals() {
        let records = decode("Alice 1001 CS AI 90 80 70 60 50\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Alice");
        assert_eq!(records[0].total_score(), 350);
    }

    #[test]
    fn decode_tolerates_trailing_spaces_and_odd_line_breaks() {
        let records = decode("Alice 1001 CS AI 90 80 70 60 50 \n\nBob 7\nEE RF 1 2 3 4 5");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].department(), "EE");
        assert_eq!(records[1].total_score(), 15);
    }

    #[test]
    fn decode_stops_at_first_malformed_group() {
        let text = "Alice 1001 CS AI 90 80 70 60 50\n\
                    Bob notanid EE RF 1 2 3 4 5\n\
                    Carol 3 ME CAD 1 1 1 1 1\n";
        let records = decode(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Alice");
    }

    #[test]
    fn decode_drops_bad_score_and_short_tail() {
        let bad_score = decode("Alice 1001 CS AI 90 80 seventy 60 50\n");
        assert!(bad_score.is_empty());

        let short_tail = decode("Alice 1001 CS AI 90 80 70 60 50\nBob 7 EE RF 1 2\n");
        assert_eq!(short_tail.len(), 1);
    }

    #[test]
    fn save_then_load_reproduces_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");
        let records = vec![
            record("Alice", 1001, [90, 80, 70, 60, 50]),
            record("Bob", 2, [5, 4, 3, 2, 1]),
        ];

        save(&path, &records).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Alice 1001 CS AI 90 80 70 60 50\nBob 2 CS AI 5 4 3 2 1\n"
        );

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, records);
        assert_eq!(loaded[0].total_score(), 350);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.dat");

        save(&path, &[record("Alice", 1, [1, 1, 1, 1, 1])]).unwrap();
        save(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.dat");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, CodecError::Read { .. }));
        assert!(err.to_string().contains("missing.dat"));
    }

    #[test]
    fn save_into_missing_directory_is_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("students.dat");

        let err = save(&path, &[]).unwrap_err();
        assert!(matches!(err, CodecError::Write { .. }));
    }
}

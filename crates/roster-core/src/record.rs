// ABOUTME: Defines StudentRecord, one student's identity, affiliation, and five course scores.
// ABOUTME: The total score is derived from the scores and recomputed whenever they change.

/// Number of course scores every record carries.
pub const SCORE_COUNT: usize = 5;

pub const MAX_NAME_LEN: usize = 9;
pub const MAX_ID_LEN: usize = 11;
pub const MAX_DEPARTMENT_LEN: usize = 11;
pub const MAX_MAJOR_LEN: usize = 10;
pub const MAX_SCORE_LEN: usize = 5;

/// A single student's record.
///
/// Name and id are fixed at construction; they are the store's uniqueness
/// keys and have no setters. The total is never set directly: it follows
/// the scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    name: String,
    id: i64,
    department: String,
    major: String,
    scores: [i32; SCORE_COUNT],
    total_score: i64,
}

impl StudentRecord {
    /// Build a record and compute its total. No length checks are applied
    /// here; `RecordStore::add` is the validating entry point.
    pub fn new(
        name: String,
        id: i64,
        department: String,
        major: String,
        scores: [i32; SCORE_COUNT],
    ) -> Self {
        Self {
            name,
            id,
            department,
            major,
            scores,
            total_score: sum(&scores),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn scores(&self) -> &[i32; SCORE_COUNT] {
        &self.scores
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Mean of the five scores. The divisor is fixed because the arity is.
    pub fn average_score(&self) -> f64 {
        self.total_score as f64 / SCORE_COUNT as f64
    }

    /// Replace department, major, and scores in one step and recompute
    /// the total.
    pub fn update(&mut self, department: String, major: String, scores: [i32; SCORE_COUNT]) {
        self.department = department;
        self.major = major;
        self.set_scores(scores);
    }

    pub fn set_scores(&mut self, scores: [i32; SCORE_COUNT]) {
        self.scores = scores;
        self.total_score = sum(&scores);
    }
}

fn sum(scores: &[i32; SCORE_COUNT]) -> i64 {
    scores.iter().map(|&s| i64::from(s)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> StudentRecord {
        StudentRecord::new(
            "Alice".to_string(),
            1001,
            "CS".to_string(),
            "AI".to_string(),
            [90, 80, 70, 60, 50],
        )
    }

    #[test]
    fn new_computes_total() {
        let record = alice();
        assert_eq!(record.total_score(), 350);
        assert_eq!(record.name(), "Alice");
        assert_eq!(record.id(), 1001);
    }

    #[test]
    fn average_divides_by_five() {
        let record = alice();
        assert_eq!(record.average_score(), 350.0 / 5.0);

        let uneven = StudentRecord::new(
            "Bob".to_string(),
            2,
            "EE".to_string(),
            "RF".to_string(),
            [1, 1, 1, 1, 3],
        );
        assert_eq!(uneven.average_score(), 1.4);
    }

    #[test]
    fn update_recomputes_total() {
        let mut record = alice();
        record.update("Math".to_string(), "Algebra".to_string(), [1, 2, 3, 4, 5]);

        assert_eq!(record.department(), "Math");
        assert_eq!(record.major(), "Algebra");
        assert_eq!(record.scores(), &[1, 2, 3, 4, 5]);
        assert_eq!(record.total_score(), 15);
    }

    #[test]
    fn total_does_not_overflow_i32() {
        let record = StudentRecord::new(
            "Big".to_string(),
            1,
            "X".to_string(),
            "Y".to_string(),
            [i32::MAX; SCORE_COUNT],
        );
        assert_eq!(record.total_score(), i64::from(i32::MAX) * 5);
    }
}

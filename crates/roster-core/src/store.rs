// ABOUTME: The in-memory RecordStore: an ordered collection of student records with unique names and ids.
// ABOUTME: Implements validated add, delete, modify, lookup, score queries, and stable in-place sorts.

use std::cmp::Ordering;

use crate::error::{Field, RecordKey, StoreError, ValidationError};
use crate::record::{
    MAX_DEPARTMENT_LEN, MAX_ID_LEN, MAX_MAJOR_LEN, MAX_NAME_LEN, MAX_SCORE_LEN, SCORE_COUNT,
    StudentRecord,
};

/// Ordered collection of student records.
///
/// Insertion order is preserved until one of the sort operations reorders
/// the records in place. Names and ids are unique at all times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-constructed records, e.g. ones decoded
    /// from the backing file. A record whose name or id repeats an earlier
    /// one is skipped. Field lengths are not checked.
    pub fn from_records(records: impl IntoIterator<Item = StudentRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Discard the current contents and admit `records` in order, with the
    /// same duplicate handling as [`RecordStore::from_records`]. Returns the
    /// number of records skipped.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = StudentRecord>) -> usize {
        self.records.clear();
        let mut skipped = 0;
        for record in records {
            if self.contains_name(record.name()) || self.contains_id(record.id()) {
                tracing::warn!(
                    name = record.name(),
                    id = record.id(),
                    "skipping record with duplicate name or id"
                );
                skipped += 1;
                continue;
            }
            self.records.push(record);
        }
        skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in current store order.
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name() == name)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    /// Validate and append a new record.
    ///
    /// Checks run in this order: score count, field lengths, score digit
    /// lengths, duplicate name, duplicate id. The first failure is returned
    /// and the store is left untouched.
    pub fn add(
        &mut self,
        name: String,
        id: i64,
        department: String,
        major: String,
        scores: &[i32],
    ) -> Result<(), StoreError> {
        let scores: [i32; SCORE_COUNT] =
            scores.try_into().map_err(|_| ValidationError::WrongScoreCount {
                expected: SCORE_COUNT,
                found: scores.len(),
            })?;

        check_len(Field::Name, name.chars().count(), MAX_NAME_LEN)?;
        check_len(Field::Id, id.to_string().len(), MAX_ID_LEN)?;
        check_len(Field::Department, department.chars().count(), MAX_DEPARTMENT_LEN)?;
        check_len(Field::Major, major.chars().count(), MAX_MAJOR_LEN)?;

        if let Some(&score) = scores
            .iter()
            .find(|s| s.to_string().len() > MAX_SCORE_LEN)
        {
            return Err(ValidationError::ScoreTooLong {
                score,
                limit: MAX_SCORE_LEN,
            }
            .into());
        }

        if self.contains_name(&name) {
            return Err(ValidationError::DuplicateName(name).into());
        }
        if self.contains_id(id) {
            return Err(ValidationError::DuplicateId(id).into());
        }

        tracing::debug!(name = %name, id, "adding student");
        self.records
            .push(StudentRecord::new(name, id, department, major, scores));
        Ok(())
    }

    pub fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError> {
        self.delete(&RecordKey::Name(name.to_string()))
    }

    pub fn delete_by_id(&mut self, id: i64) -> Result<(), StoreError> {
        self.delete(&RecordKey::Id(id))
    }

    /// Remove the record matching `key`.
    pub fn delete(&mut self, key: &RecordKey) -> Result<(), StoreError> {
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        let removed = self.records.remove(index);
        tracing::debug!(name = removed.name(), id = removed.id(), "deleted student");
        Ok(())
    }

    /// Replace department, major, and scores of the named record.
    ///
    /// Unlike `add`, no length limits are checked here. The fixed-size
    /// score array still guarantees exactly five scores.
    pub fn modify_by_name(
        &mut self,
        name: &str,
        department: String,
        major: String,
        scores: [i32; SCORE_COUNT],
    ) -> Result<(), StoreError> {
        self.apply_update(&RecordKey::Name(name.to_string()), |record| {
            record.update(department, major, scores)
        })
    }

    /// Same as [`RecordStore::modify_by_name`], keyed by id.
    pub fn modify_by_id(
        &mut self,
        id: i64,
        department: String,
        major: String,
        scores: [i32; SCORE_COUNT],
    ) -> Result<(), StoreError> {
        self.apply_update(&RecordKey::Id(id), |record| {
            record.update(department, major, scores)
        })
    }

    /// Run `update` against the record matching `key`.
    ///
    /// The closure only gets access to what `StudentRecord` exposes as
    /// mutable (department, major, scores), so it cannot break name or id
    /// uniqueness or desynchronize the total.
    pub fn apply_update<F>(&mut self, key: &RecordKey, update: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StudentRecord),
    {
        let index = self
            .position(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        update(&mut self.records[index]);
        let record = &self.records[index];
        tracing::debug!(name = record.name(), id = record.id(), "modified student");
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn find_by_id(&self, id: i64) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Look up a record by either key.
    pub fn find(&self, key: &RecordKey) -> Option<&StudentRecord> {
        match key {
            RecordKey::Name(name) => self.find_by_name(name),
            RecordKey::Id(id) => self.find_by_id(*id),
        }
    }

    /// Index of the record matching `key`. Only meaningful until the next
    /// add, delete, or sort.
    pub fn position(&self, key: &RecordKey) -> Option<usize> {
        match key {
            RecordKey::Name(name) => self.records.iter().position(|r| r.name() == name),
            RecordKey::Id(id) => self.records.iter().position(|r| r.id() == *id),
        }
    }

    /// Ascending by id. Stable.
    pub fn sort_by_id(&mut self) {
        self.records.sort_by_key(StudentRecord::id);
        tracing::debug!("sorted students by id");
    }

    /// By total score in the requested direction. Stable in both
    /// directions: equal totals keep their relative order.
    pub fn sort_by_total_score(&mut self, ascending: bool) {
        self.records
            .sort_by(|a, b| directed(a.total_score().cmp(&b.total_score()), ascending));
        tracing::debug!(ascending, "sorted students by total score");
    }

    /// By the score of course `course` (1 to 5) in the requested direction.
    /// Stable. An out-of-range course leaves the order untouched.
    pub fn sort_by_course(&mut self, course: usize, ascending: bool) -> Result<(), StoreError> {
        if !(1..=SCORE_COUNT).contains(&course) {
            return Err(StoreError::InvalidIndex(course));
        }
        let slot = course - 1;
        self.records
            .sort_by(|a, b| directed(a.scores()[slot].cmp(&b.scores()[slot]), ascending));
        tracing::debug!(course, ascending, "sorted students by course score");
        Ok(())
    }
}

/// Total score of a looked-up record, or `InvalidReference` when the lookup
/// came back empty.
pub fn total_score_of(record: Option<&StudentRecord>) -> Result<i64, StoreError> {
    record
        .map(StudentRecord::total_score)
        .ok_or(StoreError::InvalidReference)
}

/// Average score of a looked-up record, or `InvalidReference` when the
/// lookup came back empty.
pub fn average_score_of(record: Option<&StudentRecord>) -> Result<f64, StoreError> {
    record
        .map(StudentRecord::average_score)
        .ok_or(StoreError::InvalidReference)
}

fn check_len(field: Field, len: usize, limit: usize) -> Result<(), ValidationError> {
    if len > limit {
        return Err(ValidationError::FieldTooLong { field, len, limit });
    }
    Ok(())
}

fn directed(ordering: Ordering, ascending: bool) -> Ordering {
    if ascending { ordering } else { ordering.reverse() }
}

// ABOUTME: Core library for roster, containing the student record model and the in-memory store.
// ABOUTME: Also provides the error taxonomy and text presenters used by the persistence and menu layers.

pub mod error;
pub mod record;
pub mod render;
pub mod store;

pub use error::{Field, RecordKey, StoreError, ValidationError};
pub use record::{SCORE_COUNT, StudentRecord};
pub use render::{render_detail, render_table};
pub use store::{RecordStore, average_score_of, total_score_of};

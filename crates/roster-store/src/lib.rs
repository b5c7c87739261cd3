// ABOUTME: Persistence layer for roster, handling the flat-file format and persist-on-mutation.
// ABOUTME: Provides the text codec (encode/decode/load/save) and the RecordManager.

pub mod codec;
pub mod manager;

pub use codec::{CodecError, decode, encode, is_storable, load, save};
pub use manager::{ManagerError, RecordManager};

//! Pure domain logic: coordinates, the world-block vocabulary, plaque text
//! classification, lock records, the registry, and the persisted blob.

pub mod access;
pub mod block;
pub mod codec;
pub mod errors;
pub mod position;
pub mod record;
pub mod registry;
pub mod sign_text;

pub use access::Access;
pub use block::{Block, ChestPairing, Side, SignEntity, SignText};
pub use codec::{decode_locks, encode_locks, SAVE_DATA_KEY};
pub use errors::WardenError;
pub use position::{BlockPos, Direction};
pub use record::{group_id_for, normalize_username, LockRecord};
pub use registry::LockRegistry;
pub use sign_text::{
    allowed_users_from_both_sides, allowed_users_from_lines, has_private_marker, PRIVATE_MARKER,
};

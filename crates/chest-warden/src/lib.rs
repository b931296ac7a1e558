//! # Chest Warden
//!
//! Server-side owner protection for lockable containers (chests and
//! barrels). A player claims a container by attaching a wall sign whose
//! first line is `[private]`; the sign's remaining lines name the players
//! allowed in besides the owner.
//!
//! ## Architecture Role
//!
//! ```text
//! [Host event layer] ──open/break/place/edit──→ [ContainerGuardApi]
//! [Host command layer] ──unlock/list/info────→ [AdminQueryApi]
//!                                                    │
//!                                                    ↓
//!                                             [GuardService]
//!                                                    │
//!                    ┌───────────┬───────────┬───────┴────┬───────────┐
//!                    ↓           ↓           ↓            ↓           ↓
//!               [WorldView] [Messenger] [ClientSync] [Directory] [SaveData]
//! ```
//!
//! ## Invariants
//!
//! - One lock per container group; the group (single chest, paired chest,
//!   or barrel) is resolved from world state on every decision.
//! - The governing sign must remain a valid `[private]` wall sign attached
//!   to its group; a lock whose sign is gone is removed on first sight.
//! - Only the sign-edit state machine, the break path, and the dangling
//!   check mutate the registry during normal operation.
//! - A banned owner's locks stop protecting (configurable).

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod test_utils;

pub use config::WardenConfig;
pub use domain::{Access, Block, BlockPos, Direction, LockRecord, Side, SignText, WardenError};
pub use ports::inbound::{AdminQueryApi, ContainerGuardApi};
pub use ports::outbound::Actor;
pub use service::GuardService;

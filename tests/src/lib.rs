//! # Chest Warden Test Suite
//!
//! Unified integration crate exercising the service through its inbound
//! ports over the in-memory adapters from `chest_warden::test_utils`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/integration/
//! ├── lifecycle.rs     # Sign-edit state machine: create, update, dissolve
//! ├── interception.rs  # Open, break, placement, automation, fire, explosion
//! ├── admin.rs         # Admin query surface
//! └── persistence.rs   # Save-data round trips and failure handling
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p warden-tests
//!
//! # By category
//! cargo test -p warden-tests integration::lifecycle
//! cargo test -p warden-tests integration::interception
//! ```

#![allow(dead_code)]

pub mod integration;

//! Wire models shared between the OT Dashboard client core and the web front end.
//!
//! Everything in here mirrors the JSON the overtime management API speaks. The
//! server is the source of truth; these types only describe what arrives.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;

pub use models::{ErrorResponse, Page, Permission, Role, User};

//! Reaction API collaborator
//!
//! HTTP implementation of the picker's outbound seam. One client per
//! session; requests carry Basic authorization and a fixed client
//! identifier.

mod client;
mod reactions;

pub use client::{ApiClient, USER_AGENT};

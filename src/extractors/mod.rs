//! Request extractors.

pub mod id;
pub use id::{OptionalId, RequiredId};

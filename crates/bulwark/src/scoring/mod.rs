//! Secret strength scoring and generation.

pub mod generator;
pub mod strength;

pub use generator::generate_password;
pub use strength::{is_common_password, score};

//! SeaORM entity models mapping database rows to domain types.

pub mod configuration;
pub mod curriculum;
pub mod curriculum_stats;
pub mod education;
pub mod password_reset;
pub mod session;
pub mod subscription;
pub mod user;
pub mod work;

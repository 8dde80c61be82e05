//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They own the cache-aside discipline: reads
//! check the cache and populate it on miss, writes invalidate the
//! derived keys after the store commits.

mod curriculum_service;
mod user_service;

pub use curriculum_service::{CurriculumManager, CurriculumService};
pub use user_service::{UserManager, UserService};

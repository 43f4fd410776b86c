//! Service layer - user business rules.

mod user_service;

pub use user_service::{UserManager, UserService};

//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` entity, its inbound candidate/patch shapes, the outward
//! response view and the domain error taxonomy.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{NewUser, User, UserPatch, UserResponse};

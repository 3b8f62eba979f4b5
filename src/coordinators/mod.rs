// Coordinators sequence store and service operations for the API layer;
// they hold no business logic of their own.

pub mod auth_coordinator;

pub use auth_coordinator::{AuthCoordinator, AuthTokens, DEFAULT_ROLE};

// Test utilities shared across unit tests. Only compiled for tests.

pub mod utils;

//! Storage implementations.

pub mod mock;

pub use mock::MockReactionStore;

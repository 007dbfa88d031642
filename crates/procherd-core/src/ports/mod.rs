//! Port definitions (trait abstractions) for the embedding application.
//!
//! Ports define the interfaces the supervisor expects from its host. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem implementation details in any signature
//! - Optional hooks are default trait methods, not runtime reflection
//! - Intent-based methods for the spawner (not implementation-leaking)

pub mod spawner;
pub mod work;

pub use spawner::{WorkerCommand, WorkerSpawner};
pub use work::Work;

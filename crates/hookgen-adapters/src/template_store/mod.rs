//! Template set stores.

mod memory;

pub use memory::InMemoryStore;

// Adapters layer: concrete AlertStore implementations.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryAlertStore;
pub use mongo::MongoAlertStore;

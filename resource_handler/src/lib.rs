//! Resource mutation function: validates INSERT, MODIFY, REMOVE and RETRIEVE
//! requests and applies them to a versioned record table, keeping each
//! resource's `createdDate` fixed across modifications.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod metadata;
pub mod resource;
pub mod store;
pub mod validator;

pub use engine::{Outcome, ResourceEngine};
pub use error::{ResourceError, ResourceResult};
pub use handler::function_handler;
pub use resource::{Operation, Resource, Timestamp};
pub use store::{DynamoStore, MemoryStore, RecordStore};

mod attribute;
mod dynamo;
mod memory;

pub use attribute::{decode_item, decode_versions, encode_item, key_of};
pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use crate::error::ResourceResult;
use crate::resource::Resource;

/// Versioned record storage keyed by `resource_identifier`.
///
/// Each record is one version, keyed by identifier and `modifiedDate`.
/// Writing a record with an existing (identifier, modifiedDate) pair
/// replaces that version.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// The latest version of a resource.
    async fn get(&self, identifier: &str) -> ResourceResult<Option<Resource>>;
    async fn put(&self, record: &Resource) -> ResourceResult<()>;
    /// Removes every version, returning how many there were.
    async fn delete(&self, identifier: &str) -> ResourceResult<usize>;
    /// Every version, oldest first.
    async fn query_all_versions(&self, identifier: &str) -> ResourceResult<Vec<Resource>>;
}

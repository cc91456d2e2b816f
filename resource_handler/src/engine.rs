use tracing::{debug, info};
use crate::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Operation, Resource, Timestamp, CREATED_DATE, RESOURCE_IDENTIFIER};
use crate::store::RecordStore;
use crate::validator::validate;

/// What a successful operation produced.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Inserted(Resource),
    Modified(Resource),
    Removed(Resource),
    Retrieved(Option<Resource>),
}

/// Applies resource operations to a record store.
///
/// Holds no record state between calls; the store owns every version.
pub struct ResourceEngine<S> {
    store: S,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<S: RecordStore> ResourceEngine<S> {
    pub fn new(store: S) -> Self {
        ResourceEngine {
            store,
            clock: Box::new(SystemClock),
            ids: Box::new(UuidGenerator),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates, then applies `operation`.
    pub async fn execute(&self, operation: Operation, resource: Resource) -> ResourceResult<Outcome> {
        validate(operation, &resource)?;
        match operation {
            Operation::Insert => self.insert(resource).await.map(Outcome::Inserted),
            Operation::Modify => self.modify(resource).await.map(Outcome::Modified),
            Operation::Remove => self.remove(required_identifier(&resource)?).await.map(Outcome::Removed),
            Operation::Retrieve => self.retrieve(required_identifier(&resource)?).await.map(Outcome::Retrieved),
        }
    }

    pub async fn insert(&self, resource: Resource) -> ResourceResult<Resource> {
        let identifier = match resource.resource_identifier {
            Some(ref id) => {
                if self.store.get(id).await?.is_some() {
                    return Err(ResourceError::bad_request(
                        format!("Resource with identifier {} already exists", id)
                    ));
                }
                id.to_owned()
            }
            None => self.ids.new_id()
        };
        let now = self.clock.now();
        let record = Resource {
            resource_identifier: Some(identifier),
            created_date: Some(now),
            modified_date: Some(now),
            ..resource
        };
        self.store.put(&record).await?;
        info!("inserted resource {}", record.identifier().unwrap_or_default());
        Ok(record)
    }

    /// Writes a new version. `createdDate` is copied from the latest stored
    /// version; metadata, files and owner are replaced wholesale.
    pub async fn modify(&self, resource: Resource) -> ResourceResult<Resource> {
        let identifier = required_identifier(&resource)?.to_owned();
        let existing = self.store.get(&identifier).await?
            .ok_or_else(|| ResourceError::not_found(&identifier))?;
        let created = existing.created_date
            .ok_or_else(|| ResourceError::Integrity { identifier: identifier.to_owned(), field: CREATED_DATE })?;

        let record = Resource {
            resource_identifier: Some(identifier),
            created_date: Some(created),
            modified_date: Some(self.next_modified(existing.modified_date)),
            ..resource
        };
        self.store.put(&record).await?;
        info!("modified resource {}", record.identifier().unwrap_or_default());
        Ok(record)
    }

    /// Removes every version and returns the latest one.
    pub async fn remove(&self, identifier: &str) -> ResourceResult<Resource> {
        let existing = self.store.get(identifier).await?
            .ok_or_else(|| ResourceError::not_found(identifier))?;
        let removed = self.store.delete(identifier).await?;
        info!("removed {} versions of resource {}", removed, identifier);
        Ok(existing)
    }

    pub async fn retrieve(&self, identifier: &str) -> ResourceResult<Option<Resource>> {
        let found = self.store.get(identifier).await?;
        debug!("retrieve {} found: {}", identifier, found.is_some());
        Ok(found)
    }

    /// All stored versions, oldest first.
    pub async fn history(&self, identifier: &str) -> ResourceResult<Vec<Resource>> {
        self.store.query_all_versions(identifier).await
    }

    fn next_modified(&self, previous: Option<Timestamp>) -> Timestamp {
        let now = self.clock.now();
        match previous {
            Some(prev) if now <= prev => prev.next_tick(),
            _ => now,
        }
    }
}

fn required_identifier(resource: &Resource) -> ResourceResult<&str> {
    resource.identifier()
        .ok_or_else(|| ResourceError::validation(RESOURCE_IDENTIFIER, "Resource has no identifier"))
}

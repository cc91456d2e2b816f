use serde_json::Value;
use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Operation, Resource, FILES, METADATA, OWNER, RESOURCE_IDENTIFIER};

/// Checks that `resource` carries what `operation` needs.
///
/// Stops at the first failing check. The order is fixed: identifier, then
/// presence of metadata, files and owner, then the shape of metadata and files.
pub fn validate(operation: Operation, resource: &Resource) -> ResourceResult<()> {
    match operation {
        Operation::Insert => validate_content(resource, "Resource".to_string()),
        Operation::Modify => {
            let identifier = require_identifier(resource)?;
            validate_content(resource, format!("Resource with identifier {}", identifier))
        }
        Operation::Remove | Operation::Retrieve => require_identifier(resource).map(|_| ()),
    }
}

fn require_identifier(resource: &Resource) -> ResourceResult<&str> {
    resource.identifier()
        .ok_or_else(|| ResourceError::validation(RESOURCE_IDENTIFIER, "Resource has no identifier"))
}

fn validate_content(resource: &Resource, subject: String) -> ResourceResult<()> {
    if resource.metadata.is_none() {
        return Err(ResourceError::validation(METADATA, format!("{} has no metadata", subject)));
    }
    if resource.files.is_none() {
        return Err(ResourceError::validation(FILES, format!("{} has no files", subject)));
    }
    if resource.owner.is_none() {
        return Err(ResourceError::validation(OWNER, format!("{} has no owner", subject)));
    }
    if !matches!(resource.metadata, Some(Value::Object(_))) {
        return Err(ResourceError::validation(
            METADATA,
            format!("{} has invalid attribute type for metadata", subject),
        ));
    }
    if !matches!(resource.files, Some(Value::Object(_))) {
        return Err(ResourceError::validation(
            FILES,
            format!("{} has invalid attribute type for files", subject),
        ));
    }
    Ok(())
}

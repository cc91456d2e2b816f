//! Typed builders for the `metadata` and `files` documents of a resource.
//!
//! The record table stores both documents as opaque maps. These types only
//! describe the shape clients usually send, and turn it into that map with
//! absent values left out.

use std::collections::BTreeMap;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(rename = "license", skip_serializing_if = "Option::is_none")]
    pub license_identifier: Option<String>,
    #[serde(rename = "publicationYear", skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub titles: BTreeMap<String, String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

impl Metadata {
    pub fn with_title(mut self, language_code: &str, title: &str) -> Self {
        self.titles.insert(language_code.to_owned(), title.to_owned());
        self
    }

    pub fn into_value(self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct FileMetadata {
    pub filename: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub checksum: String,
    pub size: String,
}

/// Builds the `files` document: file identifier to file metadata.
pub fn files_value<'a, I>(files: I) -> serde_json::Result<Value>
where
    I: IntoIterator<Item = (&'a str, FileMetadata)>,
{
    let mut map = Map::new();
    for (identifier, file) in files {
        map.insert(identifier.to_owned(), serde_json::to_value(file)?);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_metadata_is_an_empty_map() {
        assert_eq!(Metadata::default().into_value().unwrap(), json!({}));
    }

    #[test]
    fn metadata_uses_wire_names() {
        let metadata = Metadata {
            creators: vec![String::from("AUTHORITY_IDENTIFIER_1")],
            handle: Some(String::from("https://hdl.handle.net/11250.1/1")),
            license_identifier: Some(String::from("LICENSE_IDENTIFIER_1")),
            publication_year: Some(String::from("2019")),
            publisher: Some(String::from("Unit")),
            resource_type: Some(String::from("text")),
            ..Default::default()
        }.with_title("no", "En tittel");
        assert_eq!(metadata.into_value().unwrap(), json!({
            "creators": ["AUTHORITY_IDENTIFIER_1"],
            "handle": "https://hdl.handle.net/11250.1/1",
            "license": "LICENSE_IDENTIFIER_1",
            "publicationYear": "2019",
            "publisher": "Unit",
            "titles": {"no": "En tittel"},
            "type": "text"
        }));
    }

    #[test]
    fn files_are_keyed_by_identifier() {
        let files = files_value([(
            "FILE_IDENTIFIER_1",
            FileMetadata {
                filename: String::from("a.pdf"),
                mime_type: String::from("application/pdf"),
                checksum: String::from("71f920fa275127a7b60fa4d4d41432a3"),
                size: String::from("123456789"),
            },
        )]).unwrap();
        assert_eq!(files["FILE_IDENTIFIER_1"]["mimetype"], json!("application/pdf"));
    }
}

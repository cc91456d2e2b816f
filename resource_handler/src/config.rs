use std::env;
use lambda_http::Error;

pub const TABLE_NAME: &str = "TABLE_NAME";
pub const DYNAMODB_ENDPOINT: &str = "DYNAMODB_ENDPOINT";
pub const REGION: &str = "REGION";

#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub table_name: String,
    /// Endpoint override, e.g. a DynamoDB Local instance.
    pub endpoint: Option<String>,
    pub region: Option<String>,
}

impl StoreConfig {
    pub fn from_env() -> Result<StoreConfig, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<StoreConfig, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name = lookup(TABLE_NAME)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::from(format!("{} is not set", TABLE_NAME)))?;
        Ok(StoreConfig {
            table_name,
            endpoint: lookup(DYNAMODB_ENDPOINT).filter(|e| !e.is_empty()),
            region: lookup(REGION).filter(|r| !r.is_empty()),
        })
    }
}

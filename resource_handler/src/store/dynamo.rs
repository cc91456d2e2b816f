use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb as ddb;
use aws_sdk_dynamodb::model::AttributeValue;
use tokio_stream::StreamExt;
use tracing::debug;
use crate::config::StoreConfig;
use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Resource, MODIFIED_DATE, RESOURCE_IDENTIFIER};
use super::attribute::{decode_versions, encode_item, key_of, Item};
use super::RecordStore;

const DEFAULT_REGION: &str = "eu-west-1";

/// Record table with hash key `resource_identifier` and range key `modifiedDate`.
pub struct DynamoStore {
    client: ddb::Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: ddb::Client, table_name: impl Into<String>) -> Self {
        DynamoStore { client, table_name: table_name.into() }
    }

    pub async fn connect(config: &StoreConfig) -> Self {
        let region_provider = match &config.region {
            Some(region) => RegionProviderChain::first_try(ddb::Region::new(region.to_owned()))
                .or_else(DEFAULT_REGION),
            None => RegionProviderChain::default_provider().or_else(DEFAULT_REGION),
        };
        let sdk_config = aws_config::from_env().region(region_provider).load().await;
        let ddb_config = match &config.endpoint {
            Some(endpoint) => ddb::config::Builder::from(&sdk_config).endpoint_url(endpoint).build(),
            None => ddb::config::Builder::from(&sdk_config).build()
        };
        DynamoStore::new(ddb::Client::from_conf(ddb_config), config.table_name.to_owned())
    }

    pub fn client(&self) -> &ddb::Client {
        &self.client
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Every stored item of a resource, across all result pages.
    async fn items(&self, identifier: &str, keys_only: bool) -> ResourceResult<Vec<Item>> {
        let mut query = self.client.query()
            .table_name(self.table_name.to_owned())
            .key_condition_expression("#id = :id")
            .expression_attribute_names("#id", RESOURCE_IDENTIFIER)
            .expression_attribute_values(":id", AttributeValue::S(identifier.to_owned()));
        if keys_only {
            query = query
                .projection_expression("#id, #modified")
                .expression_attribute_names("#modified", MODIFIED_DATE);
        }

        let mut items = Vec::new();
        let mut pages = query.into_paginator().send();
        while let Some(page) = pages.next().await {
            match page.map_err(ResourceError::store)?.items() {
                Some(i) => items.extend(i.iter().cloned()),
                None => break
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn get(&self, identifier: &str) -> ResourceResult<Option<Resource>> {
        // Older writers rendered the sort key without a fixed-width fraction,
        // so the newest version is picked by instant rather than by key order.
        let mut versions = decode_versions(&self.items(identifier, false).await?)?;
        Ok(versions.pop())
    }

    async fn put(&self, record: &Resource) -> ResourceResult<()> {
        let item = encode_item(record)?;
        debug!("put_item {:?}", item);
        self.client.put_item()
            .table_name(self.table_name.to_owned())
            .set_item(Some(item))
            .send()
            .await
            .map_err(ResourceError::store)?;
        Ok(())
    }

    async fn delete(&self, identifier: &str) -> ResourceResult<usize> {
        let keys = self.items(identifier, true).await?;
        let mut removed = 0;
        for item in &keys {
            self.client.delete_item()
                .table_name(self.table_name.to_owned())
                .set_key(Some(key_of(item)?))
                .send()
                .await
                .map_err(ResourceError::store)?;
            removed += 1;
        }
        Ok(removed)
    }

    async fn query_all_versions(&self, identifier: &str) -> ResourceResult<Vec<Resource>> {
        decode_versions(&self.items(identifier, false).await?)
    }
}

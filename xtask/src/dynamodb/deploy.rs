//! Table deployment operations.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, LocalSecondaryIndex, Projection,
    ProjectionType, ScalarAttributeType, TimeToLiveSpecification,
};
use aws_sdk_dynamodb::Client;

use super::client;
use super::config::{IndexConfig, KeyAttribute, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, GsiStatus, TableStatus};

fn sdk_error(err: impl std::fmt::Display) -> DynamodbError {
    DynamodbError::AwsSdk(err.to_string())
}

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
            if let Some(attribute) = &config.ttl_attribute {
                enable_ttl(client, &config.table_name, attribute).await?;
            }
        }
        DeployPlan::UpdateTable {
            table_name,
            gsis_to_add,
            enable_ttl: ttl,
        } => {
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
            if let Some(attribute) = ttl {
                enable_ttl(client, table_name, attribute).await?;
            }
        }
        DeployPlan::NoChanges { .. } => {}
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(sdk_error)?;
    }
    Ok(())
}

fn key_schema(partition_key: &KeyAttribute, sort_key: &KeyAttribute) -> Result<Vec<KeySchemaElement>> {
    Ok(vec![
        KeySchemaElement::builder()
            .attribute_name(&partition_key.name)
            .key_type(KeyType::Hash)
            .build()
            .map_err(sdk_error)?,
        KeySchemaElement::builder()
            .attribute_name(&sort_key.name)
            .key_type(KeyType::Range)
            .build()
            .map_err(sdk_error)?,
    ])
}

fn attribute_definitions<'a>(
    attributes: impl IntoIterator<Item = &'a KeyAttribute>,
) -> Result<Vec<AttributeDefinition>> {
    attributes
        .into_iter()
        .map(|attribute| {
            AttributeDefinition::builder()
                .attribute_name(&attribute.name)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(sdk_error)
        })
        .collect()
}

fn projection_all() -> Projection {
    Projection::builder()
        .projection_type(ProjectionType::All)
        .build()
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .set_key_schema(Some(key_schema(&config.partition_key, &config.sort_key)?))
        .set_attribute_definitions(Some(attribute_definitions(config.key_attributes())?))
        .billing_mode(BillingMode::PayPerRequest);

    for lsi in &config.lsis {
        request = request.local_secondary_indexes(
            LocalSecondaryIndex::builder()
                .index_name(&lsi.name)
                .set_key_schema(Some(key_schema(&lsi.partition_key, &lsi.sort_key)?))
                .projection(projection_all())
                .build()
                .map_err(sdk_error)?,
        );
    }

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .set_key_schema(Some(key_schema(&gsi.partition_key, &gsi.sort_key)?))
                .projection(projection_all())
                .build()
                .map_err(sdk_error)?,
        );
    }

    request.send().await.map_err(sdk_error)?;
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &IndexConfig) -> Result<()> {
    client
        .update_table()
        .table_name(table_name)
        .set_attribute_definitions(Some(attribute_definitions([
            &gsi.partition_key,
            &gsi.sort_key,
        ])?))
        .global_secondary_index_updates(
            GlobalSecondaryIndexUpdate::builder()
                .create(
                    CreateGlobalSecondaryIndexAction::builder()
                        .index_name(&gsi.name)
                        .set_key_schema(Some(key_schema(&gsi.partition_key, &gsi.sort_key)?))
                        .projection(projection_all())
                        .build()
                        .map_err(sdk_error)?,
                )
                .build(),
        )
        .send()
        .await
        .map_err(sdk_error)?;

    Ok(())
}

async fn enable_ttl(client: &Client, table_name: &str, attribute: &str) -> Result<()> {
    client
        .update_time_to_live()
        .table_name(table_name)
        .time_to_live_specification(
            TimeToLiveSpecification::builder()
                .attribute_name(attribute)
                .enabled(true)
                .build()
                .map_err(sdk_error)?,
        )
        .send()
        .await
        .map_err(sdk_error)?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            let all_gsis_active = state.gsis.iter().all(|g| g.status == GsiStatus::Active);
            if state.status == TableStatus::Active && all_gsis_active {
                return Ok(());
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout)
}

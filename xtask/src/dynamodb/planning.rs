//! Pure functions for calculating deployment plans.

use super::config::{IndexConfig, TableConfig};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub gsis: Vec<GsiState>,
    /// Attribute currently registered for TTL, if enabled.
    pub ttl_attribute: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// GSI state.
#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub status: GsiStatus,
}

/// GSI status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsiStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists, GSIs or TTL need to be added.
    UpdateTable {
        table_name: String,
        gsis_to_add: Vec<IndexConfig>,
        enable_ttl: Option<String>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
///
/// Local indexes cannot be added to an existing table and are not compared.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let gsis_to_add: Vec<IndexConfig> = desired
        .gsis
        .iter()
        .filter(|gsi| !state.gsis.iter().any(|g| g.name == gsi.name))
        .cloned()
        .collect();

    let enable_ttl = desired
        .ttl_attribute
        .clone()
        .filter(|attribute| state.ttl_attribute.as_ref() != Some(attribute));

    if gsis_to_add.is_empty() && enable_ttl.is_none() {
        DeployPlan::NoChanges {
            table_name: desired.table_name.clone(),
        }
    } else {
        DeployPlan::UpdateTable {
            table_name: desired.table_name.clone(),
            gsis_to_add,
            enable_ttl,
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

fn format_index(kind: &str, index: &IndexConfig) -> Vec<String> {
    vec![
        format!("  + {}: {}", kind, index.name),
        format!("    Partition key: {} (S)", index.partition_key.name),
        format!("    Sort key: {} (S)", index.sort_key.name),
    ]
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
                format!("  Sort key: {} (S)", config.sort_key.name),
            ];
            for lsi in &config.lsis {
                lines.extend(format_index("LSI", lsi));
            }
            for gsi in &config.gsis {
                lines.extend(format_index("GSI", gsi));
            }
            if let Some(ttl) = &config.ttl_attribute {
                lines.push(format!("  + TTL: {}", ttl));
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::UpdateTable {
            table_name,
            gsis_to_add,
            enable_ttl,
        } => {
            let mut lines = vec![format!("~ Update table: {}", table_name)];
            for gsi in gsis_to_add {
                lines.push(format!("  + Add GSI: {}", gsi.name));
            }
            if let Some(ttl) = enable_ttl {
                lines.push(format!("  + Enable TTL: {}", ttl));
            }
            lines
        }
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

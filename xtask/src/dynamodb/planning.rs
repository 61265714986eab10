//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Key attribute names in `[HASH, RANGE]` order.
    pub key_names: Vec<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
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
    /// Table exists with a different key schema. Keys cannot be altered in place.
    KeyMismatch { table_name: String, found: Vec<String> },
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
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            config: desired.clone(),
        },
        Some(state) if state.key_names.iter().map(String::as_str).eq(desired.key_names()) => {
            DeployPlan::NoChanges {
                table_name: desired.table_name.clone(),
            }
        }
        Some(state) => DeployPlan::KeyMismatch {
            table_name: desired.table_name.clone(),
            found: state.key_names.clone(),
        },
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

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.partition_key.name),
            format!("  Sort key: {} (S)", config.sort_key.name),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::KeyMismatch { table_name, found } => vec![
            format!("! Table '{}' has key schema [{}]", table_name, found.join(", ")),
            "  Destroy and redeploy to use [id, email]".to_string(),
        ],
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

#[cfg(test)]
mod tests {
    use super::super::config::feedback_table_config;
    use super::*;

    fn state(keys: &[&str]) -> TableState {
        TableState {
            status: TableStatus::Active,
            key_names: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = feedback_table_config();
        assert_eq!(
            calculate_deploy_plan(None, &config),
            DeployPlan::CreateTable { config }
        );
    }

    #[test]
    fn test_matching_table_has_no_changes() {
        let config = feedback_table_config();
        let plan = calculate_deploy_plan(Some(&state(&["id", "email"])), &config);
        assert!(matches!(plan, DeployPlan::NoChanges { .. }));
    }

    #[test]
    fn test_reordered_keys_are_a_mismatch() {
        let config = feedback_table_config();
        let plan = calculate_deploy_plan(Some(&state(&["email", "id"])), &config);
        assert!(matches!(plan, DeployPlan::KeyMismatch { .. }));
    }

    #[test]
    fn test_create_plan_lists_both_keys() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: feedback_table_config().with_table_name("feedback-test"),
        });
        assert_eq!(lines[0], "+ Create table: feedback-test");
        assert!(lines.iter().any(|l| l.contains("Partition key: id")));
        assert!(lines.iter().any(|l| l.contains("Sort key: email")));
    }

    #[test]
    fn test_destroy_plan() {
        let plan = calculate_destroy_plan(None, "feedback");
        assert_eq!(
            format_destroy_plan(&plan),
            vec!["= Table 'feedback' does not exist"]
        );
    }
}

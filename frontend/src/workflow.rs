//! Wizard state machine for the four-step transformation workflow.
//!
//! Steps are freely navigable in either direction; there is no terminal
//! state. Entering the MySQL or MongoDB step unconditionally clears that
//! step's scoped state (the step has no memory across visits); entering
//! Learn or Apply has no reset side effect. The transformation session
//! itself is global and never step-scoped.
//!
//! All resets go through explicit transition methods here instead of
//! being scattered across UI handlers: [`WorkflowState::enter`] owns the
//! step-entry reset table, and each drill-down setter on the browse
//! states enumerates exactly which levels below it are invalidated.

use crate::types::{DownloadHandle, TablePreview};

// =============================================================================
// Steps
// =============================================================================

/// One wizard step, ordinal 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStep {
    #[default]
    Learn,
    Apply,
    MySql,
    MongoDb,
}

impl WorkflowStep {
    /// All steps in sidebar order.
    pub const ALL: [WorkflowStep; 4] = [
        WorkflowStep::Learn,
        WorkflowStep::Apply,
        WorkflowStep::MySql,
        WorkflowStep::MongoDb,
    ];

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowStep::Learn => "Learn Transformation",
            WorkflowStep::Apply => "Apply Transformation",
            WorkflowStep::MySql => "Connect to MySQL",
            WorkflowStep::MongoDb => "Connect to MongoDB",
        }
    }
}

// =============================================================================
// MySQL browse state (step-scoped)
// =============================================================================

/// Drill-down state for the MySQL step: connection secret, then
/// database -> table -> column, then previews. Selecting at any level
/// invalidates everything below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MysqlBrowse {
    pub password: String,
    pub databases: Vec<String>,
    pub selected_database: String,
    pub tables: Vec<String>,
    pub selected_table: String,
    pub columns: Vec<String>,
    pub selected_column: String,
    pub table_preview: Option<TablePreview>,
    pub transformed_preview: Option<TablePreview>,
    pub download: Option<DownloadHandle>,
    pub error: Option<String>,
}

impl MysqlBrowse {
    /// A connect attempt restarts the whole drill-down.
    pub fn begin_connect(&mut self) {
        self.databases.clear();
        self.selected_database.clear();
        self.tables.clear();
        self.selected_table.clear();
        self.columns.clear();
        self.selected_column.clear();
        self.table_preview = None;
        self.transformed_preview = None;
        self.download = None;
        self.error = None;
    }

    pub fn set_databases(&mut self, databases: Vec<String>) {
        self.databases = databases;
    }

    pub fn select_database(&mut self, database: String) {
        self.selected_database = database;
        self.tables.clear();
        self.selected_table.clear();
        self.columns.clear();
        self.selected_column.clear();
        self.table_preview = None;
        self.transformed_preview = None;
        self.download = None;
    }

    pub fn set_tables(&mut self, tables: Vec<String>) {
        self.tables = tables;
    }

    pub fn select_table(&mut self, table: String) {
        self.selected_table = table;
        self.columns.clear();
        self.selected_column.clear();
        self.table_preview = None;
        self.transformed_preview = None;
        self.download = None;
    }

    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }

    pub fn select_column(&mut self, column: String) {
        self.selected_column = column;
        self.table_preview = None;
        self.transformed_preview = None;
        self.download = None;
    }
}

// =============================================================================
// MongoDB browse state (step-scoped)
// =============================================================================

/// Drill-down state for the MongoDB step. No credential level: the
/// service owns the connection. The identity key column is excluded from
/// the transformable-column choices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MongoBrowse {
    pub databases: Vec<String>,
    pub selected_database: String,
    pub collections: Vec<String>,
    pub selected_collection: String,
    pub preview: Option<TablePreview>,
    pub selected_column: String,
    pub transformed_preview: Option<TablePreview>,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl MongoBrowse {
    pub fn set_databases(&mut self, databases: Vec<String>) {
        self.databases = databases;
    }

    pub fn select_database(&mut self, database: String) {
        self.selected_database = database;
        self.collections.clear();
        self.selected_collection.clear();
        self.preview = None;
        self.selected_column.clear();
        self.transformed_preview = None;
        self.success = None;
    }

    pub fn set_collections(&mut self, collections: Vec<String>) {
        self.collections = collections;
    }

    pub fn select_collection(&mut self, collection: String) {
        self.selected_collection = collection;
        self.preview = None;
        self.selected_column.clear();
        self.transformed_preview = None;
        self.success = None;
    }

    pub fn set_preview(&mut self, preview: TablePreview) {
        self.preview = Some(preview);
    }

    pub fn select_column(&mut self, column: String) {
        self.selected_column = column;
        self.transformed_preview = None;
        self.success = None;
    }

    /// Columns offered for transformation: the preview headers minus the
    /// identity key.
    pub fn column_choices(&self) -> Vec<String> {
        self.preview
            .as_ref()
            .map(|p| {
                p.headers
                    .iter()
                    .filter(|h| h.as_str() != "_id")
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

// =============================================================================
// Workflow state
// =============================================================================

/// The orchestrator's state value: current step plus the two step-scoped
/// browse states. Learn/Apply state lives outside (it persists across
/// revisits and has no reset transitions).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    pub mysql: MysqlBrowse,
    pub mongo: MongoBrowse,
}

impl WorkflowState {
    /// Step-entry transition. This is the only place step-scoped state is
    /// reset, matching the reset table: MySQL and MongoDB clear their
    /// scope on every entry, Learn and Apply keep theirs.
    pub fn enter(&mut self, step: WorkflowStep) {
        self.step = step;
        match step {
            WorkflowStep::MySql => self.mysql = MysqlBrowse::default(),
            WorkflowStep::MongoDb => self.mongo = MongoBrowse::default(),
            WorkflowStep::Learn | WorkflowStep::Apply => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TablePreview;

    fn preview(headers: &[&str]) -> TablePreview {
        TablePreview {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            data: Vec::new(),
        }
    }

    fn populated_mysql() -> MysqlBrowse {
        let mut m = MysqlBrowse {
            password: "hunter2".into(),
            ..Default::default()
        };
        m.set_databases(vec!["shop".into()]);
        m.select_database("shop".into());
        m.set_tables(vec!["orders".into()]);
        m.select_table("orders".into());
        m.set_columns(vec!["id".into(), "total".into()]);
        m.select_column("total".into());
        m.table_preview = Some(preview(&["id", "total"]));
        m.transformed_preview = Some(preview(&["id", "total"]));
        m.download = Some(DownloadHandle {
            url: "blob:abc".into(),
            filename: "orders_transformed.csv".into(),
        });
        m
    }

    #[test]
    fn test_entering_mysql_resets_scope() {
        let mut state = WorkflowState::default();
        state.enter(WorkflowStep::MySql);
        state.mysql = populated_mysql();

        // Leave and come back: the step has no memory across visits.
        state.enter(WorkflowStep::Apply);
        state.enter(WorkflowStep::MySql);

        assert_eq!(state.mysql, MysqlBrowse::default());
    }

    #[test]
    fn test_entering_mongo_resets_scope() {
        let mut state = WorkflowState::default();
        state.enter(WorkflowStep::MongoDb);
        state.mongo.set_databases(vec!["inventory".into()]);
        state.mongo.select_database("inventory".into());
        state.mongo.error = Some("boom".into());

        state.enter(WorkflowStep::Learn);
        state.enter(WorkflowStep::MongoDb);

        assert_eq!(state.mongo, MongoBrowse::default());
    }

    #[test]
    fn test_entering_learn_and_apply_keeps_everything() {
        let mut state = WorkflowState::default();
        state.mysql = populated_mysql();

        state.enter(WorkflowStep::Learn);
        state.enter(WorkflowStep::Apply);

        // No reset side effect for these steps.
        assert_eq!(state.mysql, populated_mysql());
    }

    #[test]
    fn test_mysql_database_selection_clears_below() {
        let mut m = populated_mysql();
        m.select_database("crm".into());

        assert_eq!(m.selected_database, "crm");
        assert!(m.tables.is_empty());
        assert!(m.selected_table.is_empty());
        assert!(m.columns.is_empty());
        assert!(m.selected_column.is_empty());
        assert!(m.table_preview.is_none());
        assert!(m.transformed_preview.is_none());
        assert!(m.download.is_none());
        // The databases list itself survives: it is not below the selection.
        assert_eq!(m.databases, vec!["shop".to_string()]);
    }

    #[test]
    fn test_mysql_table_selection_clears_below_keeps_database() {
        let mut m = populated_mysql();
        m.select_table("customers".into());

        assert_eq!(m.selected_database, "shop");
        assert_eq!(m.selected_table, "customers");
        assert!(m.columns.is_empty());
        assert!(m.table_preview.is_none());
        assert!(m.download.is_none());
    }

    #[test]
    fn test_mysql_column_selection_clears_previews_only() {
        let mut m = populated_mysql();
        m.select_column("id".into());

        assert_eq!(m.selected_column, "id");
        assert_eq!(m.columns, vec!["id".to_string(), "total".to_string()]);
        assert!(m.table_preview.is_none());
        assert!(m.transformed_preview.is_none());
        assert!(m.download.is_none());
    }

    #[test]
    fn test_mysql_begin_connect_restarts_drilldown() {
        let mut m = populated_mysql();
        m.error = Some("old error".into());
        m.begin_connect();

        assert!(m.databases.is_empty());
        assert!(m.selected_column.is_empty());
        assert!(m.error.is_none());
        // The typed password survives the reset.
        assert_eq!(m.password, "hunter2");
    }

    #[test]
    fn test_mongo_collection_selection_clears_below() {
        let mut m = MongoBrowse::default();
        m.set_databases(vec!["inventory".into()]);
        m.select_database("inventory".into());
        m.set_collections(vec!["items".into()]);
        m.select_collection("items".into());
        m.set_preview(preview(&["_id", "name"]));
        m.select_column("name".into());
        m.transformed_preview = Some(preview(&["_id", "name"]));
        m.success = Some("done".into());

        m.select_collection("orders".into());
        assert!(m.preview.is_none());
        assert!(m.selected_column.is_empty());
        assert!(m.transformed_preview.is_none());
        assert!(m.success.is_none());
    }

    #[test]
    fn test_mongo_column_choices_exclude_identity_key() {
        let mut m = MongoBrowse::default();
        m.set_preview(preview(&["_id", "name", "price"]));

        assert_eq!(m.column_choices(), vec!["name".to_string(), "price".to_string()]);
    }

    #[test]
    fn test_step_labels_and_order() {
        let labels: Vec<&str> = WorkflowStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Learn Transformation",
                "Apply Transformation",
                "Connect to MySQL",
                "Connect to MongoDB",
            ]
        );
    }
}

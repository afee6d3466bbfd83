//! Session and unit of work for sermodel.
//!
//! The Session is an in-memory row store implementing [`Store`]. It assigns keys,
//! enforces the column constraints declared on each model, keeps rows in creation
//! order, and offers an explicit transaction boundary so callers can make nested
//! creation all-or-nothing.
//!
//! # Design Philosophy
//!
//! - **Explicit over implicit**: nothing is rolled back unless a transaction is open
//! - **Ownership clarity**: the session owns every row it created
//! - **Identity map**: one row per `(model, key)`, looked up in constant time
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::new();
//!
//! // Everything created inside the closure is discarded if it returns an error.
//! let provider = session.atomic(|s| DATA_PROVIDER.deserialize(s, &payload, &filter))?;
//! ```

use std::collections::HashMap;

use sermodel_core::{
    Direction, Error, FieldInfo, FieldKind, FieldValues, ModelMeta, Record, RelationshipKind, Result,
    Store, Value,
};

// ============================================================================
// Session Configuration
// ============================================================================

/// Configuration for Session behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Reject rows that leave a non-nullable field without a value.
    pub enforce_not_null: bool,
    /// Reject forward keys that do not reference an existing row.
    pub enforce_foreign_keys: bool,
    /// Reject duplicate values in unique fields.
    pub enforce_unique: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enforce_not_null: true,
            enforce_foreign_keys: true,
            enforce_unique: true,
        }
    }
}

impl SessionConfig {
    /// A configuration that accepts any row shape.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            enforce_not_null: false,
            enforce_foreign_keys: false,
            enforce_unique: false,
        }
    }

    #[must_use]
    pub const fn enforce_not_null(mut self, value: bool) -> Self {
        self.enforce_not_null = value;
        self
    }

    #[must_use]
    pub const fn enforce_foreign_keys(mut self, value: bool) -> Self {
        self.enforce_foreign_keys = value;
        self
    }

    #[must_use]
    pub const fn enforce_unique(mut self, value: bool) -> Self {
        self.enforce_unique = value;
        self
    }
}

// ============================================================================
// Object Key and Tables
// ============================================================================

/// Unique key for a row in the identity map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    /// Model name.
    model: &'static str,
    /// Primary key value.
    key: i64,
}

impl ObjectKey {
    /// Create an object key from a stored row.
    pub fn from_record(record: &Record) -> Self {
        Self {
            model: record.model().name,
            key: record.key(),
        }
    }

    /// Create an object key from a model and primary key.
    pub fn from_pk(model: &ModelMeta, key: i64) -> Self {
        Self {
            model: model.name,
            key,
        }
    }
}

/// Rows of one model, in creation order.
#[derive(Debug, Clone, Default)]
struct Table {
    rows: Vec<Record>,
    last_key: i64,
}

#[derive(Debug, Clone, Default)]
struct State {
    tables: HashMap<&'static str, Table>,
    /// ObjectKey -> position in its table's `rows`.
    identity_map: HashMap<ObjectKey, usize>,
}

// ============================================================================
// Session
// ============================================================================

/// The Session is the central unit-of-work manager.
#[derive(Debug, Default)]
pub struct Session {
    state: State,
    /// State captured by `begin`, restored by `rollback`.
    savepoint: Option<State>,
    config: SessionConfig,
}

impl Session {
    /// Create a new session with the default (strict) configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a new session with custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            state: State::default(),
            savepoint: None,
            config,
        }
    }

    /// Get the session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All rows of a model, in creation order.
    pub fn all(&self, model: &ModelMeta) -> &[Record] {
        self.state
            .tables
            .get(model.table_name)
            .map(|t| t.rows.as_slice())
            .unwrap_or_default()
    }

    /// Number of rows of a model.
    pub fn count(&self, model: &ModelMeta) -> usize {
        self.all(model).len()
    }

    /// Check if a row is tracked by this session.
    pub fn contains(&self, record: &Record) -> bool {
        self.state
            .identity_map
            .contains_key(&ObjectKey::from_record(record))
    }

    /// First row of a model whose `field` holds `value`.
    pub fn find_by(&self, model: &ModelMeta, field: &str, value: &Value) -> Option<&Record> {
        self.all(model).iter().find(|r| r.get(field) == Some(value))
    }

    fn lookup(&self, model: &ModelMeta, key: i64) -> Option<&Record> {
        let idx = *self
            .state
            .identity_map
            .get(&ObjectKey::from_pk(model, key))?;
        self.state.tables.get(model.table_name)?.rows.get(idx)
    }

    // ========================================================================
    // Transaction Management
    // ========================================================================

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.savepoint.is_some()
    }

    /// Begin a transaction.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn begin(&mut self) -> Result<()> {
        if self.savepoint.is_some() {
            return Err(Error::State("transaction already in progress".to_string()));
        }
        tracing::info!("Beginning transaction");
        self.savepoint = Some(self.state.clone());
        Ok(())
    }

    /// Commit the current transaction.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn commit(&mut self) -> Result<()> {
        if self.savepoint.take().is_none() {
            return Err(Error::State("commit without an open transaction".to_string()));
        }
        tracing::info!("Committing transaction");
        Ok(())
    }

    /// Rollback the current transaction, discarding every row created since `begin`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn rollback(&mut self) -> Result<()> {
        let Some(saved) = self.savepoint.take() else {
            return Err(Error::State("rollback without an open transaction".to_string()));
        };
        tracing::info!("Rolling back transaction");
        self.state = saved;
        Ok(())
    }

    /// Run `f` inside a transaction: commit on `Ok`, roll back on `Err`.
    pub fn atomic<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.begin()?;
        match f(self) {
            Ok(value) => {
                self.commit()?;
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Transaction body failed");
                self.rollback()?;
                Err(e)
            }
        }
    }

    // ========================================================================
    // Constraint Checks
    // ========================================================================

    fn check_column(&self, model: &'static ModelMeta, field: &FieldInfo, value: &Value) -> Result<()> {
        if value.is_null() {
            if self.config.enforce_not_null && !field.nullable {
                return Err(Error::Persistence(format!(
                    "NOT NULL constraint failed: {}.{}",
                    model.table_name, field.name
                )));
            }
            return Ok(());
        }

        if let FieldKind::Relation(info) = &field.kind {
            let Some(target_key) = value.as_i64() else {
                return Err(Error::Persistence(format!(
                    "{}.{} must hold a key, got {}",
                    model.table_name,
                    field.name,
                    value.type_name()
                )));
            };
            if self.config.enforce_foreign_keys
                && self.lookup(info.related_model(), target_key).is_none()
            {
                return Err(Error::Persistence(format!(
                    "FOREIGN KEY constraint failed: {}.{} -> {} {}",
                    model.table_name,
                    field.name,
                    info.related_model().name,
                    target_key
                )));
            }
        }

        if self.config.enforce_unique
            && field.unique
            && self.find_by(model, field.name, value).is_some()
        {
            return Err(Error::Persistence(format!(
                "UNIQUE constraint failed: {}.{}",
                model.table_name, field.name
            )));
        }
        Ok(())
    }

    /// Fill omitted columns and check every column against the model's constraints.
    fn prepare_row(&self, model: &'static ModelMeta, mut values: FieldValues) -> Result<FieldValues> {
        for name in values.keys() {
            if !model.field(name).is_some_and(stores_value) {
                return Err(Error::Persistence(format!(
                    "table {} has no writable column {}",
                    model.table_name, name
                )));
            }
        }

        for field in model.fields.iter().filter(|f| stores_value(f)) {
            if !values.contains_key(field.name) {
                let filled = if field.kind.is_relation() {
                    Value::Null
                } else {
                    field.default_value()?.unwrap_or(Value::Null)
                };
                values.insert(field.name, filled);
            }
            self.check_column(model, field, &values[field.name])?;
        }
        Ok(values)
    }
}

/// Reverse relations, link-table relations and generated keys have no column of their own.
fn stores_value(field: &FieldInfo) -> bool {
    match &field.kind {
        FieldKind::Relation(info) => {
            info.direction == Direction::Forward && info.kind != RelationshipKind::ManyToMany
        }
        FieldKind::Auto => false,
        _ => true,
    }
}

impl Store for Session {
    #[tracing::instrument(level = "debug", skip(self, values), fields(model = model.name))]
    fn create_row(&mut self, model: &'static ModelMeta, values: FieldValues) -> Result<Record> {
        let values = self.prepare_row(model, values)?;

        let table = self.state.tables.entry(model.table_name).or_default();
        table.last_key += 1;
        let record = Record::new(model, table.last_key, values);
        table.rows.push(record.clone());
        self.state
            .identity_map
            .insert(ObjectKey::from_record(&record), table.rows.len() - 1);

        tracing::trace!(
            table = model.table_name,
            key = record.key(),
            "Inserted row"
        );
        Ok(record)
    }

    fn get(&self, model: &'static ModelMeta, key: i64) -> Option<&Record> {
        self.lookup(model, key)
    }

    fn find_related(&self, model: &'static ModelMeta, field: &str, key: i64) -> Vec<&Record> {
        self.all(model)
            .iter()
            .filter(|r| r.foreign_key(field) == Some(key))
            .collect()
    }
}

//! Descriptor model shared by the builders and the renderer.
//!
//! Descriptors are the finished, immutable description of what gets
//! generated. Builders make every naming and typing decision while producing
//! them; the renderer only turns them into tokens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the private field holding the table handle in table structs.
///
/// Columns may not sanitize to this name; validation rejects them.
pub const TABLE_HANDLE_FIELD: &str = "__table";

/// One column as reported by the catalog, in extraction order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub schema: String,
    pub table: String,
    pub column: String,
    /// Catalog type name, e.g. `nvarchar`.
    #[serde(rename = "type")]
    pub native_type: String,
}

impl PropertyMetadata {
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        native_type: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            column: column.into(),
            native_type: native_type.into(),
        }
    }

    /// The `(schema, table)` pair this column belongs to.
    pub fn table_key(&self) -> TableKey {
        TableKey {
            schema: self.schema.clone(),
            table: self.table.clone(),
        }
    }
}

/// Identity of a table within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableKey {
    pub schema: String,
    pub table: String,
}

/// All columns of one table, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub schema: String,
    pub name: String,
    /// Sanitized struct name, with or without the schema prefix.
    pub class_name: String,
    pub properties: Vec<PropertyMetadata>,
}

/// Insertion-ordered map from [`TableKey`] to [`TableDescriptor`].
///
/// Iteration order is the order in which tables first appeared in the
/// catalog, which is the only ordering signal a catalog provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMap {
    entries: Vec<(TableKey, TableDescriptor)>,
    index: HashMap<TableKey, usize>,
}

impl TableMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &TableKey) -> Option<&TableDescriptor> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    /// Returns the descriptor for `key`, creating it with `create` on first sight.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: TableKey,
        create: impl FnOnce() -> TableDescriptor,
    ) -> &mut TableDescriptor {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.index.insert(key.clone(), idx);
                self.entries.push((key, create()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &TableKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.entries.iter().map(|(_, table)| table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TableKey, &TableDescriptor)> {
        self.entries.iter().map(|(key, table)| (key, table))
    }
}

/// What a [`ClassDescriptor`] renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassKind {
    /// Entry points for every table; members are `name() -> Type` constructors.
    Registry,
    /// A table struct; members are column fields.
    Table { schema: String, name: String },
    /// A typed column wrapper around the runtime field type.
    Field { value_type: String },
    /// A directory of static resources; members are path constants.
    Directory { path: String },
}

/// A generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    pub kind: ClassKind,
    pub members: Vec<MemberDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<MemberDescriptor>) -> Self {
        self.members = members;
        self
    }
}

/// A named, typed member of a generated declaration.
///
/// `value` is a pre-formatted token fragment (a quoted literal or a
/// constructor call). It is emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    pub type_name: String,
    pub value: String,
}

impl MemberDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: value.into(),
        }
    }
}

//! Relational descriptor builder.
//!
//! Turns the flat, ordered column records of a table catalog into table
//! descriptors and then into the classes the renderer emits: one registry,
//! and per table one table struct followed by one typed wrapper per column.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use crate::descriptor::{
    ClassDescriptor, ClassKind, MemberDescriptor, PropertyMetadata, TableDescriptor, TableMap,
};
use crate::errors::GeneratorError;
use crate::sanitize::{path_segment, quote_literal, sanitize};
use crate::validation::validate_classes;

/// Default name of the registry struct.
pub const DEFAULT_REGISTRY: &str = "SQL";

/// Catalog types known out of the box (SQL Server names).
const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("bigint", "i64"),
    ("binary", "Vec<u8>"),
    ("bit", "bool"),
    ("char", "String"),
    ("date", "chrono::NaiveDate"),
    ("datetime", "chrono::NaiveDateTime"),
    ("datetime2", "chrono::NaiveDateTime"),
    ("datetimeoffset", "chrono::DateTime<chrono::FixedOffset>"),
    ("decimal", "f64"),
    ("float", "f64"),
    ("image", "Vec<u8>"),
    ("int", "i32"),
    ("money", "f64"),
    ("nchar", "String"),
    ("ntext", "String"),
    ("numeric", "f64"),
    ("nvarchar", "String"),
    ("real", "f32"),
    ("rowversion", "Vec<u8>"),
    ("smalldatetime", "chrono::NaiveDateTime"),
    ("smallint", "i16"),
    ("smallmoney", "f64"),
    ("sysname", "String"),
    ("text", "String"),
    ("time", "chrono::NaiveTime"),
    ("timestamp", "Vec<u8>"),
    ("tinyint", "u8"),
    ("uniqueidentifier", "uuid::Uuid"),
    ("varbinary", "Vec<u8>"),
    ("varchar", "String"),
    ("xml", "String"),
];

/// Maps catalog types to Rust type names.
///
/// Lookups ignore ASCII case, since catalogs report `INT` and `int` alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
    types: BTreeMap<String, String>,
}

impl TypeMap {
    /// An empty map: every type is unsupported until inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map preloaded with the SQL Server catalog types.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        for (native, target) in DEFAULT_TYPES {
            map.insert(*native, *target);
        }
        map
    }

    /// Adds or replaces the mapping for `native_type`.
    pub fn insert(&mut self, native_type: impl AsRef<str>, target_type: impl Into<String>) {
        self.types
            .insert(native_type.as_ref().to_ascii_lowercase(), target_type.into());
    }

    pub fn get(&self, native_type: &str) -> Option<&str> {
        self.types
            .get(&native_type.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Resolves the Rust type of a column.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::UnsupportedType` when the column's type is unmapped.
    pub fn resolve(&self, property: &PropertyMetadata) -> Result<&str, GeneratorError> {
        self.get(&property.native_type)
            .ok_or_else(|| GeneratorError::UnsupportedType {
                native_type: property.native_type.clone(),
                schema: property.schema.clone(),
                table: property.table.clone(),
                column: property.column.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for TypeMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (native, target) in iter {
            self.insert(native, target);
        }
    }
}

/// Settings for the relational builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalOptions {
    /// Prefix struct names with the schema (`dbo_Posts` instead of `Posts`).
    pub include_schema: bool,
    /// Name of the registry struct.
    pub registry: String,
    pub types: TypeMap,
}

impl Default for RelationalOptions {
    fn default() -> Self {
        Self {
            include_schema: true,
            registry: DEFAULT_REGISTRY.to_string(),
            types: TypeMap::with_defaults(),
        }
    }
}

/// Output of [`build_relational_model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationalModel {
    /// Tables in first-seen order.
    pub tables: TableMap,
    /// Classes in render order: registry, then each table and its columns.
    pub classes: Vec<ClassDescriptor>,
}

/// Struct name of a table.
///
/// ## Examples
///
/// ```
/// use declgen::relational::table_class_name;
///
/// assert_eq!(table_class_name("dbo", "Posts", true), "dbo_Posts");
/// assert_eq!(table_class_name("dbo", "Order Details", false), "Order_Details");
/// ```
pub fn table_class_name(schema: &str, table: &str, include_schema: bool) -> String {
    if include_schema {
        sanitize(&format!("{schema}_{table}"))
    } else {
        sanitize(table)
    }
}

/// Groups column records by table in a single pass.
///
/// Tables appear in the order their first column appears; columns keep
/// their record order within each table.
pub fn group_tables(
    records: impl IntoIterator<Item = PropertyMetadata>,
    include_schema: bool,
) -> TableMap {
    let mut tables = TableMap::new();

    for record in records {
        let table = tables.get_or_insert_with(record.table_key(), || TableDescriptor {
            schema: record.schema.clone(),
            name: record.table.clone(),
            class_name: table_class_name(&record.schema, &record.table, include_schema),
            properties: Vec::new(),
        });
        table.properties.push(record);
    }

    tables
}

/// Builds the class descriptors for grouped tables.
///
/// Registry entries are named after their table's class, so the same table
/// name in two schemas yields two entries when schemas are included.
///
/// ## Errors
///
/// Returns `GeneratorError::UnsupportedType` for the first column whose type
/// is missing from `options.types`. Nothing is returned in that case.
pub fn describe_tables(
    tables: &TableMap,
    options: &RelationalOptions,
) -> Result<Vec<ClassDescriptor>, GeneratorError> {
    let entries = tables
        .values()
        .map(|table| {
            MemberDescriptor::new(
                &table.class_name,
                &table.class_name,
                format!("{}::new()", path_segment(&table.class_name)),
            )
        })
        .collect();

    let mut classes =
        vec![ClassDescriptor::new(&options.registry, ClassKind::Registry).with_members(entries)];

    for table in tables.values() {
        debug!(
            schema = %table.schema,
            table = %table.name,
            columns = table.properties.len(),
            "Describing table"
        );
        classes.extend(describe_table(table, &options.types)?);
    }

    Ok(classes)
}

fn describe_table(
    table: &TableDescriptor,
    types: &TypeMap,
) -> Result<Vec<ClassDescriptor>, GeneratorError> {
    let mut columns = Vec::with_capacity(table.properties.len());
    let mut wrappers = Vec::with_capacity(table.properties.len());

    for property in &table.properties {
        let value_type = types.resolve(property)?;
        let column = sanitize(&property.column);
        let wrapper = format!("{}_{}", table.class_name, column);

        columns.push(MemberDescriptor::new(
            column,
            &wrapper,
            quote_literal(&property.column),
        ));
        wrappers.push(ClassDescriptor::new(
            wrapper,
            ClassKind::Field {
                value_type: value_type.to_string(),
            },
        ));
    }

    let mut classes = Vec::with_capacity(wrappers.len() + 1);
    classes.push(
        ClassDescriptor::new(
            &table.class_name,
            ClassKind::Table {
                schema: table.schema.clone(),
                name: table.name.clone(),
            },
        )
        .with_members(columns),
    );
    classes.extend(wrappers);

    Ok(classes)
}

/// Groups, describes and validates a catalog.
///
/// ## Errors
///
/// Returns `GeneratorError::UnsupportedType` for unmapped column types and
/// `GeneratorError::NamingCollision` when sanitized names clash.
#[instrument(skip_all, fields(include_schema = options.include_schema))]
pub fn build_relational_model(
    records: impl IntoIterator<Item = PropertyMetadata>,
    options: &RelationalOptions,
) -> Result<RelationalModel, GeneratorError> {
    let tables = group_tables(records, options.include_schema);
    let classes = describe_tables(&tables, options)?;
    validate_classes(&classes)?;

    info!(
        tables = tables.len(),
        classes = classes.len(),
        "Built relational model"
    );

    Ok(RelationalModel { tables, classes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TableKey;

    fn blog_catalog() -> Vec<PropertyMetadata> {
        vec![
            PropertyMetadata::new("dbo", "Posts", "Id", "int"),
            PropertyMetadata::new("dbo", "Posts", "BlogId", "int"),
            PropertyMetadata::new("dbo", "Blogs", "Id", "int"),
            PropertyMetadata::new("dbo", "Posts", "Title", "nvarchar"),
            PropertyMetadata::new("dbo", "Blogs", "Name", "nvarchar"),
        ]
    }

    fn key(schema: &str, table: &str) -> TableKey {
        TableKey {
            schema: schema.to_string(),
            table: table.to_string(),
        }
    }

    #[test]
    fn group_tables_preserves_first_seen_order() {
        let records = vec![
            PropertyMetadata::new("s", "t1", "c1", "int"),
            PropertyMetadata::new("s", "t1", "c2", "int"),
            PropertyMetadata::new("s", "t2", "c1", "int"),
        ];

        let tables = group_tables(records, true);

        let names: Vec<_> = tables.values().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["t1", "t2"]);

        let t1 = tables.get(&key("s", "t1")).unwrap();
        let columns: Vec<_> = t1.properties.iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, vec!["c1", "c2"]);
    }

    #[test]
    fn group_tables_merges_interleaved_records() {
        let tables = group_tables(blog_catalog(), true);

        assert_eq!(tables.len(), 2);
        let posts = tables.get(&key("dbo", "Posts")).unwrap();
        let columns: Vec<_> = posts.properties.iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, vec!["Id", "BlogId", "Title"]);
    }

    #[test]
    fn same_table_name_in_two_schemas_stays_separate() {
        let records = vec![
            PropertyMetadata::new("dbo", "Users", "Id", "int"),
            PropertyMetadata::new("audit", "Users", "Id", "int"),
        ];

        let tables = group_tables(records, true);

        let classes: Vec<_> = tables.values().map(|t| t.class_name.as_str()).collect();
        assert_eq!(classes, vec!["dbo_Users", "audit_Users"]);
    }

    #[test]
    fn class_name_respects_schema_flag() {
        let with = group_tables(blog_catalog(), true);
        let without = group_tables(blog_catalog(), false);

        assert_eq!(with.get(&key("dbo", "Posts")).unwrap().class_name, "dbo_Posts");
        assert_eq!(without.get(&key("dbo", "Posts")).unwrap().class_name, "Posts");
    }

    #[test]
    fn class_name_is_sanitized() {
        assert_eq!(
            table_class_name("sales", "Order Details", true),
            "sales_Order_Details"
        );
    }

    #[test]
    fn describe_tables_orders_registry_tables_and_wrappers() {
        let tables = group_tables(blog_catalog(), true);
        let classes = describe_tables(&tables, &RelationalOptions::default()).unwrap();

        let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "SQL",
                "dbo_Posts",
                "dbo_Posts_Id",
                "dbo_Posts_BlogId",
                "dbo_Posts_Title",
                "dbo_Blogs",
                "dbo_Blogs_Id",
                "dbo_Blogs_Name",
            ]
        );
    }

    #[test]
    fn registry_lists_every_table() {
        let tables = group_tables(blog_catalog(), true);
        let classes = describe_tables(&tables, &RelationalOptions::default()).unwrap();

        let registry = &classes[0];
        assert_eq!(registry.kind, ClassKind::Registry);
        assert_eq!(
            registry.members,
            vec![
                MemberDescriptor::new("dbo_Posts", "dbo_Posts", "dbo_Posts::new()"),
                MemberDescriptor::new("dbo_Blogs", "dbo_Blogs", "dbo_Blogs::new()"),
            ]
        );
    }

    #[test]
    fn table_members_reference_their_wrappers() {
        let tables = group_tables(blog_catalog(), true);
        let classes = describe_tables(&tables, &RelationalOptions::default()).unwrap();

        let posts = &classes[1];
        assert_eq!(
            posts.kind,
            ClassKind::Table {
                schema: "dbo".to_string(),
                name: "Posts".to_string(),
            }
        );
        assert_eq!(
            posts.members[2],
            MemberDescriptor::new("Title", "dbo_Posts_Title", "\"Title\"")
        );
    }

    #[test]
    fn wrappers_carry_the_mapped_type() {
        let tables = group_tables(blog_catalog(), true);
        let classes = describe_tables(&tables, &RelationalOptions::default()).unwrap();

        assert_eq!(
            classes[2].kind,
            ClassKind::Field {
                value_type: "i32".to_string()
            }
        );
        assert_eq!(
            classes[4].kind,
            ClassKind::Field {
                value_type: "String".to_string()
            }
        );
    }

    #[test]
    fn column_names_are_sanitized_but_literal_is_kept() {
        let records = vec![PropertyMetadata::new("dbo", "Orders", "Unit Price", "money")];
        let model = build_relational_model(records, &RelationalOptions::default()).unwrap();

        let table = &model.classes[1];
        assert_eq!(
            table.members[0],
            MemberDescriptor::new("Unit_Price", "dbo_Orders_Unit_Price", "\"Unit Price\"")
        );
    }

    #[test]
    fn keyword_class_names_get_raw_constructor_paths() {
        let records = vec![PropertyMetadata::new("dbo", "type", "Id", "int")];
        let options = RelationalOptions {
            include_schema: false,
            ..RelationalOptions::default()
        };
        let model = build_relational_model(records, &options).unwrap();

        assert_eq!(model.classes[0].members[0].value, "r#type::new()");
    }

    #[test]
    fn unmapped_type_is_rejected_with_context() {
        let mut records = blog_catalog();
        records.push(PropertyMetadata::new("dbo", "Blogs", "Location", "geography"));

        let err = build_relational_model(records, &RelationalOptions::default()).unwrap_err();
        match err {
            GeneratorError::UnsupportedType {
                native_type,
                schema,
                table,
                column,
            } => {
                assert_eq!(native_type, "geography");
                assert_eq!(schema, "dbo");
                assert_eq!(table, "Blogs");
                assert_eq!(column, "Location");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_map_lookup_ignores_case() {
        let types = TypeMap::with_defaults();
        assert_eq!(types.get("NVARCHAR"), Some("String"));
        assert_eq!(types.get("UniqueIdentifier"), Some("uuid::Uuid"));
    }

    #[test]
    fn type_map_overrides_defaults() {
        let mut types = TypeMap::with_defaults();
        types.extend([("MONEY", "rust_decimal::Decimal")]);
        assert_eq!(types.get("money"), Some("rust_decimal::Decimal"));
    }

    #[test]
    fn empty_type_map_rejects_everything() {
        let options = RelationalOptions {
            types: TypeMap::new(),
            ..RelationalOptions::default()
        };
        let result = build_relational_model(blog_catalog(), &options);
        assert!(matches!(result, Err(GeneratorError::UnsupportedType { .. })));
    }

    #[test]
    fn folded_names_collide() {
        let records = vec![
            PropertyMetadata::new("dbo", "a_b", "c", "int"),
            PropertyMetadata::new("dbo", "a", "b_c", "int"),
        ];
        let options = RelationalOptions {
            include_schema: false,
            ..RelationalOptions::default()
        };

        let err = build_relational_model(records, &options).unwrap_err();
        assert!(matches!(err, GeneratorError::NamingCollision { ref name, .. } if name == "a_b_c"));
    }

    #[test]
    fn same_table_in_two_schemas_gets_two_registry_entries() {
        let records = vec![
            PropertyMetadata::new("dbo", "Users", "Id", "int"),
            PropertyMetadata::new("audit", "Users", "Id", "int"),
        ];

        let model = build_relational_model(records, &RelationalOptions::default()).unwrap();

        let entries: Vec<_> = model.classes[0].members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(entries, vec!["dbo_Users", "audit_Users"]);
    }

    #[test]
    fn same_table_in_two_schemas_collides_without_schema_prefix() {
        let records = vec![
            PropertyMetadata::new("dbo", "Users", "Id", "int"),
            PropertyMetadata::new("audit", "Users", "Id", "int"),
        ];
        let options = RelationalOptions {
            include_schema: false,
            ..RelationalOptions::default()
        };

        let err = build_relational_model(records, &options).unwrap_err();
        assert!(matches!(err, GeneratorError::NamingCollision { ref name, .. } if name == "Users"));
    }

    #[test]
    fn building_twice_is_identical() {
        let first = build_relational_model(blog_catalog(), &RelationalOptions::default()).unwrap();
        let second = build_relational_model(blog_catalog(), &RelationalOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}

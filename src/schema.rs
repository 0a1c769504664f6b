//! Schema model: an immutable view over canonical statements.
//!
//! All lookups the differ needs (`tables_by_name`, per-table
//! `fields_by_name` and `indices`) are built once in [`Schema::new`].

use std::collections::HashMap;

use crate::ast::{CreateTable, Field, Index, Qualifier, Statement};

/// A parsed schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    statements: Vec<Statement>,
    tables: Vec<Table>,
    /// Position in `tables`; the last definition of a name wins.
    tables_by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn new(statements: Vec<Statement>) -> Self {
        let tables: Vec<Table> = statements
            .iter()
            .filter_map(Statement::as_create_table)
            .cloned()
            .map(Table::new)
            .collect();
        let tables_by_name = tables
            .iter()
            .enumerate()
            .map(|(i, table)| (table.name().to_string(), i))
            .collect();

        tracing::debug!(
            statements = statements.len(),
            tables = tables.len(),
            "built schema model"
        );

        Self {
            statements,
            tables,
            tables_by_name,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// `CREATE TABLE` statements in source order.
    pub fn create_tables(&self) -> impl Iterator<Item = &CreateTable> {
        self.statements.iter().filter_map(Statement::as_create_table)
    }

    /// One table per `CREATE TABLE`, in source order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Table names in source order. Duplicates are kept.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(Table::name).collect()
    }

    /// Tables keyed by name. On duplicate names the later definition wins.
    pub fn tables_by_name(&self) -> HashMap<&str, &Table> {
        self.tables_by_name
            .iter()
            .map(|(name, &i)| (name.as_str(), &self.tables[i]))
            .collect()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables_by_name.get(name).map(|&i| &self.tables[i])
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables_by_name.contains_key(name)
    }

    /// Names from `USE`, `CREATE DATABASE` and `CREATE SCHEMA`.
    pub fn database_names(&self) -> Vec<&str> {
        self.statements
            .iter()
            .filter_map(|statement| match statement {
                Statement::DatabaseReference { name } => Some(name.as_str()),
                Statement::CreateTable(_) | Statement::Ignored => None,
            })
            .collect()
    }
}

/// A table view with derived field and index lookups.
#[derive(Debug, Clone)]
pub struct Table {
    definition: CreateTable,
    fields_by_name: HashMap<String, usize>,
    /// Declared indices followed by ones synthesized from field qualifiers.
    indices: Vec<Index>,
}

impl Table {
    pub fn new(definition: CreateTable) -> Self {
        let fields_by_name = definition
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| (field.name.clone(), i))
            .collect();
        let indices = definition
            .indices
            .iter()
            .cloned()
            .chain(definition.fields.iter().filter_map(Field::index))
            .collect();

        Self {
            definition,
            fields_by_name,
            indices,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &CreateTable {
        &self.definition
    }

    pub fn fields(&self) -> &[Field] {
        &self.definition.fields
    }

    /// Fields keyed by name. On duplicate names the later definition wins.
    pub fn fields_by_name(&self) -> HashMap<&str, &Field> {
        self.fields_by_name
            .iter()
            .map(|(name, &i)| (name.as_str(), &self.definition.fields[i]))
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields_by_name
            .get(name)
            .map(|&i| &self.definition.fields[i])
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }
}

impl Field {
    /// Qualifiers without the index-describing ones (`PRIMARY KEY`,
    /// `UNIQUE KEY`), in source order.
    pub fn comparable_qualifiers(&self) -> Vec<&Qualifier> {
        self.qualifiers.iter().filter(|q| !q.is_index()).collect()
    }

    /// Same name and same definition. `==` compares the definition only.
    pub fn is_identical(&self, other: &Field) -> bool {
        self.name == other.name && self == other
    }

    /// The index described by this field's qualifiers, if any.
    ///
    /// The first index-describing qualifier decides.
    pub fn index(&self) -> Option<Index> {
        self.qualifiers.iter().find_map(|qualifier| match qualifier {
            Qualifier::PrimaryKey => Some(Index::primary(self.name.as_str())),
            Qualifier::UniqueKey => Some(Index::unique(self.name.as_str())),
            _ => None,
        })
    }
}

/// Fields compare by definition: type, type arguments and
/// [`Field::comparable_qualifiers`]. The name is the lookup key and is not
/// part of value equality.
impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.data_type == other.data_type
            && self.type_args == other.type_args
            && self.comparable_qualifiers() == other.comparable_qualifiers()
    }
}

impl Eq for Field {}

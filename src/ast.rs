//! Canonical, dialect-agnostic schema representation.
//!
//! These are the nodes produced by [`crate::parser::transform`]. They carry no
//! syntactic artifacts: identifier quoting is stripped, type names are
//! lower-cased and default values are classified.

use serde::Serialize;

/// A top-level schema statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Statement {
    /// `USE db`, `CREATE DATABASE db`, `CREATE SCHEMA db`.
    DatabaseReference { name: String },
    CreateTable(CreateTable),
    /// Recognized syntax that carries nothing the model needs.
    Ignored,
}

impl Statement {
    pub fn as_create_table(&self) -> Option<&CreateTable> {
        match self {
            Self::CreateTable(table) => Some(table),
            Self::DatabaseReference { .. } | Self::Ignored => None,
        }
    }
}

/// A `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTable {
    pub name: String,
    pub fields: Vec<Field>,
    /// Indices declared as create-definitions, in source order.
    pub indices: Vec<Index>,
}

/// A column definition.
///
/// Value equality ignores the name; see the `PartialEq` impl in
/// [`crate::schema`].
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,
    /// Lower-cased type name, e.g. `varchar`.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Raw type arguments, e.g. `["10", "2"]` for `DECIMAL(10,2)`.
    pub type_args: Vec<String>,
    pub qualifiers: Vec<Qualifier>,
}

/// Field-level modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Qualifier {
    NotNull,
    Null,
    PrimaryKey,
    AutoIncrement,
    CharacterSet(String),
    Collate(String),
    UniqueKey,
    Key,
    Default(DefaultValue),
}

impl Qualifier {
    /// True for qualifiers that describe an index rather than the column.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::PrimaryKey | Self::UniqueKey)
    }
}

/// Classified `DEFAULT` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DefaultValue {
    /// Unescaped contents of a quoted string.
    StringLiteral(String),
    /// `b'0101'`, as its unsigned value.
    BitLiteral(u64),
    /// `CURRENT_TIMESTAMP`, `CURRENT_TIMESTAMP()` or `NOW()`.
    CurrentTimestamp,
    /// Numbers, `NULL` and any other bare token run.
    Unclassified(String),
}

/// Storage method hint for an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexStructure {
    Btree,
    Hash,
    Rtree,
}

impl IndexStructure {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
            Self::Rtree => "RTREE",
        }
    }
}

/// An index, either declared or synthesized from field qualifiers.
///
/// Two indices are equal iff every attribute is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Index {
    /// Indexed columns in declaration order. Never empty.
    pub columns: Vec<String>,
    pub name: Option<String>,
    pub structure: Option<IndexStructure>,
    pub primary: bool,
    pub unique: bool,
    pub fulltext: bool,
    pub spatial: bool,
}

impl Index {
    /// A plain index over `columns` with every flag unset.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            name: None,
            structure: None,
            primary: false,
            unique: false,
            fulltext: false,
            spatial: false,
        }
    }

    pub fn primary(column: impl Into<String>) -> Self {
        Self {
            primary: true,
            ..Self::new(vec![column.into()])
        }
    }

    pub fn unique(column: impl Into<String>) -> Self {
        Self {
            unique: true,
            ..Self::new(vec![column.into()])
        }
    }

    /// Leading indexed column.
    pub fn column(&self) -> &str {
        self.columns.first().map(String::as_str).unwrap_or_default()
    }
}

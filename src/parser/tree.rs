//! Concrete parse tree.
//!
//! Nodes borrow from the schema text and keep identifier quoting, escape
//! sequences and discarded syntax around so the grammar stays a pure
//! recognizer. [`super::transform`] turns this into [`crate::ast`].

use crate::ast::IndexStructure;

#[derive(Debug, Clone, PartialEq)]
pub enum RawStatement<'a> {
    Comment(&'a str),
    Use { database: &'a str },
    Set(&'a str),
    DropTable(&'a str),
    CreateDatabase { name: &'a str },
    CreateTable(RawCreateTable<'a>),
    AlterTable { table: &'a str, body: &'a str },
    Insert(&'a str),
    Delimiter(&'a str),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawCreateTable<'a> {
    pub temporary: bool,
    pub if_not_exists: bool,
    /// Possibly quoted table name.
    pub name: &'a str,
    pub definitions: Vec<RawDefinition<'a>>,
    pub options: Vec<RawTableOption<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDefinition<'a> {
    Index(RawIndex<'a>),
    /// `FOREIGN KEY ... REFERENCES ...`, kept as source text.
    ForeignKey(&'a str),
    Field(RawField<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawIndexKind {
    Primary,
    Unique,
    Fulltext,
    Spatial,
    Plain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawIndex<'a> {
    pub kind: RawIndexKind,
    pub name: Option<&'a str>,
    /// Structure given between the keyword and the column list.
    pub structure_before: Option<IndexStructure>,
    pub columns: Vec<&'a str>,
    /// Structure given after the column list.
    pub structure_after: Option<IndexStructure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawField<'a> {
    pub name: &'a str,
    pub type_name: &'a str,
    pub type_args: Vec<&'a str>,
    /// `UNSIGNED`, `ZEROFILL`, ...
    pub type_qualifiers: Vec<&'a str>,
    pub qualifiers: Vec<RawQualifier<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawQualifier<'a> {
    NotNull,
    Null,
    PrimaryKey,
    AutoIncrement,
    CharacterSet(&'a str),
    Collate(&'a str),
    UniqueKey,
    Key,
    Default(RawDefault<'a>),
    Comment(&'a str),
    OnUpdate(RawDefault<'a>),
    /// Inline `REFERENCES tbl (cols) ...`, kept as source text.
    References(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawDefault<'a> {
    CurrentTimestamp,
    /// Body between the quotes, escapes still in place.
    Quoted { quote: char, body: &'a str },
    /// The binary digits of `b'...'`.
    Bit(&'a str),
    Token(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawTableOption<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

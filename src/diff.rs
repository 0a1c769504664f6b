//! Diff engine.
//!
//! Compares two [`Schema`]s by table name, then by field name and full index
//! equality within each table present on both sides.
//!
//! ```text
//! before ─┐
//!         ├─ creates: after − before   (after order)
//! after  ─┤  alters:  before ∩ after   (sorted by table name)
//!         └─ drops:   before − after   (before order)
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ast::{CreateTable, Field, Index};
use crate::schema::{Schema, Table};

/// One clause of an `ALTER TABLE`.
///
/// `==` inherits [`Field`] equality, so field clauses compare without their
/// field names. Use [`Field::is_identical`] when names matter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AlterClause {
    AddField(Field),
    DropField(String),
    AlterField(Field),
    DropIndex(Index),
    AddIndex(Index),
}

impl AlterClause {
    /// Position in the fixed clause order of one `ALTER TABLE`.
    fn rank(&self) -> u8 {
        match self {
            Self::AddField(_) => 0,
            Self::DropField(_) => 1,
            Self::AlterField(_) => 2,
            Self::DropIndex(_) => 3,
            Self::AddIndex(_) => 4,
        }
    }
}

/// Knobs for [`diff_schemas_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Emit `AlterField` for every field name present on both sides, even
    /// when the field is unchanged.
    pub alter_unchanged_fields: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            alter_unchanged_fields: true,
        }
    }
}

impl DiffOptions {
    /// Only alter fields whose definition changed.
    pub fn skip_unchanged() -> Self {
        Self {
            alter_unchanged_fields: false,
        }
    }
}

/// Operations that turn a before-schema into an after-schema.
///
/// Equality ignores field names inside `creates` and `alters`, as
/// [`AlterClause`] does.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    /// Full definitions of tables only in the after-schema.
    pub creates: Vec<CreateTable>,
    /// Clauses per table present on both sides. Tables without clauses are
    /// absent.
    pub alters: BTreeMap<String, Vec<AlterClause>>,
    /// Names of tables only in the before-schema.
    pub drops: Vec<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.alters.is_empty() && self.drops.is_empty()
    }

    /// Number of top-level statements the diff renders to.
    pub fn statement_count(&self) -> usize {
        self.creates.len() + self.alters.len() + self.drops.len()
    }
}

/// Diff with [`DiffOptions::default`].
pub fn diff_schemas(before: &Schema, after: &Schema) -> Diff {
    diff_schemas_with(before, after, DiffOptions::default())
}

pub fn diff_schemas_with(before: &Schema, after: &Schema, options: DiffOptions) -> Diff {
    let creates: Vec<CreateTable> = after
        .tables()
        .iter()
        .filter(|table| !before.contains_table(table.name()))
        .map(|table| table.definition().clone())
        .collect();

    let drops: Vec<String> = before
        .table_names()
        .into_iter()
        .filter(|name| !after.contains_table(name))
        .map(str::to_string)
        .collect();

    let mut alters = BTreeMap::new();
    for (name, after_table) in after.tables_by_name() {
        let Some(before_table) = before.table(name) else {
            continue;
        };
        let clauses = alter_table(before_table, after_table, options);
        tracing::trace!(table = name, clauses = clauses.len(), "compared table");
        if !clauses.is_empty() {
            alters.insert(name.to_string(), clauses);
        }
    }

    tracing::debug!(
        creates = creates.len(),
        alters = alters.len(),
        drops = drops.len(),
        "computed schema diff"
    );

    Diff {
        creates,
        alters,
        drops,
    }
}

/// Clauses for a table present on both sides, in rank order.
fn alter_table(before: &Table, after: &Table, options: DiffOptions) -> Vec<AlterClause> {
    let mut clauses = Vec::new();

    clauses.extend(
        after
            .fields()
            .iter()
            .filter(|field| before.field(&field.name).is_none())
            .cloned()
            .map(AlterClause::AddField),
    );

    clauses.extend(
        before
            .fields()
            .iter()
            .filter(|field| after.field(&field.name).is_none())
            .map(|field| AlterClause::DropField(field.name.clone())),
    );

    clauses.extend(
        after
            .fields()
            .iter()
            .filter(|field| match before.field(&field.name) {
                Some(previous) => options.alter_unchanged_fields || previous != *field,
                None => false,
            })
            .cloned()
            .map(AlterClause::AlterField),
    );

    clauses.extend(
        before
            .indices()
            .iter()
            .filter(|index| !after.indices().contains(index))
            .cloned()
            .map(AlterClause::DropIndex),
    );

    clauses.extend(
        after
            .indices()
            .iter()
            .filter(|index| !before.indices().contains(index))
            .cloned()
            .map(AlterClause::AddIndex),
    );

    debug_assert!(clauses.windows(2).all(|w| w[0].rank() <= w[1].rank()));
    clauses
}

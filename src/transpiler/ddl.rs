use super::traits::SqlGenerator;
use crate::ast::*;
use crate::diff::AlterClause;

/// Generate CREATE TABLE SQL.
pub fn build_create_table(table: &CreateTable, generator: &dyn SqlGenerator) -> String {
    let mut sql = String::new();
    sql.push_str("CREATE TABLE ");
    sql.push_str(&generator.quote_identifier(&table.name));
    sql.push_str(" (\n");

    let defs: Vec<String> = table
        .fields
        .iter()
        .map(|field| build_field(field, generator))
        .chain(table.indices.iter().map(|index| build_index(index, generator)))
        .map(|def| format!("  {}", def))
        .collect();

    sql.push_str(&defs.join(",\n"));
    sql.push_str("\n);");
    sql
}

/// Generate ALTER TABLE SQL. The first clause shares the line with the
/// table name.
pub fn build_alter_table(
    table: &str,
    clauses: &[AlterClause],
    generator: &dyn SqlGenerator,
) -> String {
    let clauses: Vec<String> = clauses
        .iter()
        .map(|clause| build_alter_clause(clause, generator))
        .collect();

    format!(
        "ALTER TABLE {} {};",
        generator.quote_identifier(table),
        clauses.join(",\n  ")
    )
}

/// Generate DROP TABLE SQL.
pub fn build_drop_table(table: &str, generator: &dyn SqlGenerator) -> String {
    format!("DROP TABLE {};", generator.quote_identifier(table))
}

pub fn build_alter_clause(clause: &AlterClause, generator: &dyn SqlGenerator) -> String {
    match clause {
        AlterClause::AddField(field) => format!("ADD COLUMN {}", build_field(field, generator)),
        AlterClause::DropField(name) => {
            format!("DROP COLUMN {}", generator.quote_identifier(name))
        }
        AlterClause::AlterField(field) => {
            format!("CHANGE COLUMN {}", build_field(field, generator))
        }
        AlterClause::DropIndex(index) if index.primary => "DROP PRIMARY KEY".to_string(),
        AlterClause::DropIndex(index) => {
            // Unnamed indices are referenced by their leading column, which
            // only matches MySQL's auto-generated name for single-column keys.
            let name = index.name.as_deref().unwrap_or_else(|| index.column());
            format!("DROP INDEX {}", generator.quote_identifier(name))
        }
        AlterClause::AddIndex(index) => format!("ADD {}", build_index(index, generator)),
    }
}

/// `` `name` TYPE[(args)] [qualifiers] ``
pub fn build_field(field: &Field, generator: &dyn SqlGenerator) -> String {
    let mut sql = format!(
        "{} {}",
        generator.quote_identifier(&field.name),
        field.data_type.to_uppercase()
    );

    if !field.type_args.is_empty() {
        sql.push_str(&format!("({})", field.type_args.join(", ")));
    }

    for qualifier in &field.qualifiers {
        sql.push(' ');
        sql.push_str(&build_qualifier(qualifier, generator));
    }
    sql
}

pub fn build_qualifier(qualifier: &Qualifier, generator: &dyn SqlGenerator) -> String {
    match qualifier {
        Qualifier::NotNull => "NOT NULL".to_string(),
        Qualifier::Null => "NULL".to_string(),
        Qualifier::PrimaryKey => "PRIMARY KEY".to_string(),
        Qualifier::AutoIncrement => "AUTO_INCREMENT".to_string(),
        Qualifier::CharacterSet(charset) => format!("CHARACTER SET {}", charset),
        Qualifier::Collate(collation) => format!("COLLATE {}", collation),
        Qualifier::UniqueKey => "UNIQUE KEY".to_string(),
        Qualifier::Key => "KEY".to_string(),
        Qualifier::Default(value) => format!("DEFAULT {}", build_default(value, generator)),
    }
}

pub fn build_default(value: &DefaultValue, generator: &dyn SqlGenerator) -> String {
    match value {
        DefaultValue::StringLiteral(text) => generator.quote_string(text),
        DefaultValue::BitLiteral(bits) => generator.bit_literal(*bits),
        DefaultValue::CurrentTimestamp => "CURRENT_TIMESTAMP()".to_string(),
        DefaultValue::Unclassified(raw) => raw.clone(),
    }
}

/// `PREFIX [`name`] [USING structure] (`col`, ...)`
pub fn build_index(index: &Index, generator: &dyn SqlGenerator) -> String {
    let mut sql = index_prefix(index).to_string();

    if let Some(name) = &index.name {
        sql.push(' ');
        sql.push_str(&generator.quote_identifier(name));
    }
    if let Some(structure) = index.structure {
        sql.push_str(" USING ");
        sql.push_str(structure.as_sql());
    }

    let columns: Vec<String> = index
        .columns
        .iter()
        .map(|column| generator.quote_identifier(column))
        .collect();
    sql.push_str(&format!(" ({})", columns.join(", ")));
    sql
}

/// Keyword introducing an index, by flag precedence.
fn index_prefix(index: &Index) -> &'static str {
    if index.primary {
        "PRIMARY KEY"
    } else if index.unique {
        "UNIQUE KEY"
    } else if index.fulltext {
        "FULLTEXT"
    } else if index.spatial {
        "SPATIAL"
    } else {
        "KEY"
    }
}

use pretty_assertions::assert_eq;

use super::*;
use crate::diff::{diff_schemas, diff_schemas_with, AlterClause, DiffOptions};
use crate::parser::parse;
use crate::schema::Schema;

fn schema(sql: &str) -> Schema {
    Schema::new(parse(sql, Dialect::MySQL).unwrap())
}

const BEFORE: &str = "
CREATE TABLE `table1` (`column1` INTEGER NOT NULL AUTO_INCREMENT, PRIMARY KEY (`column1`));
CREATE TABLE `table2` (`column1` INTEGER NOT NULL AUTO_INCREMENT, PRIMARY KEY (`column1`));
";

const AFTER: &str = "
CREATE TABLE `table1` (`column1` INTEGER NOT NULL AUTO_INCREMENT, `column2` VARCHAR(255) NOT NULL, PRIMARY KEY (`column1`));
CREATE TABLE `table3` (`column1` INTEGER NOT NULL AUTO_INCREMENT, PRIMARY KEY (`column1`));
";

// ========================================================================
// Scripts
// ========================================================================

#[test]
fn test_script_skipping_unchanged_fields() {
    let diff = diff_schemas_with(&schema(BEFORE), &schema(AFTER), DiffOptions::skip_unchanged());
    assert_eq!(
        render(&diff, Dialect::MySQL),
        "BEGIN;

SET foreign_key_checks=0;

CREATE TABLE `table3` (
  `column1` INTEGER NOT NULL AUTO_INCREMENT,
  PRIMARY KEY (`column1`)
);

ALTER TABLE `table1` ADD COLUMN `column2` VARCHAR(255) NOT NULL;

DROP TABLE `table2`;

SET foreign_key_checks=1;

COMMIT;
"
    );
}

#[test]
fn test_script_alters_unchanged_fields_by_default() {
    // The unchanged `column1` still gets a CHANGE COLUMN clause.
    let diff = diff_schemas(&schema(BEFORE), &schema(AFTER));
    assert_eq!(
        diff.to_sql(),
        "BEGIN;

SET foreign_key_checks=0;

CREATE TABLE `table3` (
  `column1` INTEGER NOT NULL AUTO_INCREMENT,
  PRIMARY KEY (`column1`)
);

ALTER TABLE `table1` ADD COLUMN `column2` VARCHAR(255) NOT NULL,
  CHANGE COLUMN `column1` INTEGER NOT NULL AUTO_INCREMENT;

DROP TABLE `table2`;

SET foreign_key_checks=1;

COMMIT;
"
    );
}

#[test]
fn test_script_with_index_changes() {
    let before = schema(
        "CREATE TABLE `table1` (
            `column1` INTEGER(11) PRIMARY KEY NOT NULL AUTO INCREMENT,
            `column2` DATETIME DEFAULT NOW()
        );",
    );
    let after = schema(
        "CREATE TABLE `table1` (
            `column1` CHAR(11) NOT NULL AUTO INCREMENT,
            `column2` DATETIME DEFAULT CURRENT_TIMESTAMP(),
            `column3` VARCHAR(255) NOT NULL DEFAULT \"a\",
            PRIMARY KEY (`column2`)
        );",
    );
    let diff = diff_schemas_with(&before, &after, DiffOptions::skip_unchanged());

    assert_eq!(
        diff.to_sql(),
        "BEGIN;

SET foreign_key_checks=0;

ALTER TABLE `table1` ADD COLUMN `column3` VARCHAR(255) NOT NULL DEFAULT 'a',
  CHANGE COLUMN `column1` CHAR(11) NOT NULL AUTO_INCREMENT,
  DROP PRIMARY KEY,
  ADD PRIMARY KEY (`column2`);

SET foreign_key_checks=1;

COMMIT;
"
    );
}

#[test]
fn test_empty_diff_has_no_stray_blank_lines() {
    let shop = schema("CREATE TABLE t (id INT);");
    let diff = diff_schemas_with(&shop, &shop, DiffOptions::skip_unchanged());
    assert_eq!(
        render(&diff, Dialect::MySQL),
        "BEGIN;\n\nSET foreign_key_checks=0;\n\nSET foreign_key_checks=1;\n\nCOMMIT;\n"
    );
}

#[test]
fn test_multiple_statements_per_block() {
    let diff = diff_schemas(
        &schema("CREATE TABLE a (x INT); CREATE TABLE b (x INT);"),
        &schema("CREATE TABLE c (x INT); CREATE TABLE d (x INT);"),
    );
    let sql = diff.to_sql();
    assert!(sql.contains("CREATE TABLE `c` (\n  `x` INT\n);\n\nCREATE TABLE `d` (\n  `x` INT\n);"));
    assert!(sql.contains("DROP TABLE `a`;\n\nDROP TABLE `b`;"));
}

// ========================================================================
// Clauses
// ========================================================================

#[test]
fn test_drop_unnamed_index_uses_column_name() {
    // Only valid SQL when MySQL named the index after its first column.
    let diff = diff_schemas_with(
        &schema("CREATE TABLE t (a INT, b INT, KEY (a, b), UNIQUE KEY `u` (b));"),
        &schema("CREATE TABLE t (a INT, b INT);"),
        DiffOptions::skip_unchanged(),
    );
    let sql = ddl::build_alter_table("t", &diff.alters["t"], &sql::mysql::MysqlGenerator);
    assert_eq!(sql, "ALTER TABLE `t` DROP INDEX `a`,\n  DROP INDEX `u`;");
}

#[test]
fn test_drop_primary_key() {
    let clause = AlterClause::DropIndex(Index::primary("id"));
    assert_eq!(
        ddl::build_alter_clause(&clause, &sql::mysql::MysqlGenerator),
        "DROP PRIMARY KEY"
    );
}

#[test]
fn test_add_index_clause() {
    let mut index = Index::new(vec!["a".to_string(), "b".to_string()]);
    index.name = Some("ab".to_string());
    index.structure = Some(IndexStructure::Btree);
    assert_eq!(
        ddl::build_alter_clause(&AlterClause::AddIndex(index), &sql::mysql::MysqlGenerator),
        "ADD KEY `ab` USING BTREE (`a`, `b`)"
    );

    assert_eq!(
        ddl::build_alter_clause(
            &AlterClause::AddIndex(Index::unique("email")),
            &sql::mysql::MysqlGenerator,
        ),
        "ADD UNIQUE KEY (`email`)"
    );
}

#[test]
fn test_drop_column_clause() {
    let clause = AlterClause::DropField("legacy".to_string());
    assert_eq!(
        ddl::build_alter_clause(&clause, &sql::mysql::MysqlGenerator),
        "DROP COLUMN `legacy`"
    );
}

#[test]
fn test_index_prefix_precedence() {
    let mut index = Index::new(vec!["c".to_string()]);
    index.fulltext = true;
    index.spatial = true;
    assert_eq!(index.to_sql(), "FULLTEXT (`c`)");

    index.unique = true;
    assert_eq!(index.to_sql(), "UNIQUE KEY (`c`)");

    index.primary = true;
    assert_eq!(index.to_sql(), "PRIMARY KEY (`c`)");

    let mut spatial = Index::new(vec!["geo".to_string()]);
    spatial.spatial = true;
    assert_eq!(spatial.to_sql(), "SPATIAL (`geo`)");
}

// ========================================================================
// Fields
// ========================================================================

#[test]
fn test_field_rendering() {
    let field = Field {
        name: "price".to_string(),
        data_type: "decimal".to_string(),
        type_args: vec!["10".to_string(), "2".to_string()],
        qualifiers: vec![
            Qualifier::NotNull,
            Qualifier::Default(DefaultValue::Unclassified("0.00".to_string())),
        ],
    };
    assert_eq!(field.to_sql(), "`price` DECIMAL(10, 2) NOT NULL DEFAULT 0.00");
}

#[test]
fn test_default_rendering() {
    let generator = sql::mysql::MysqlGenerator;
    let cases = [
        (DefaultValue::StringLiteral("it's".to_string()), "'it''s'"),
        (DefaultValue::BitLiteral(15), "b'1111'"),
        (DefaultValue::BitLiteral(0), "b'0'"),
        (DefaultValue::CurrentTimestamp, "CURRENT_TIMESTAMP()"),
        (DefaultValue::Unclassified("NULL".to_string()), "NULL"),
    ];
    for (value, expected) in cases {
        assert_eq!(ddl::build_default(&value, &generator), expected);
    }
}

#[test]
fn test_qualifier_rendering() {
    let generator = sql::mysql::MysqlGenerator;
    let rendered: Vec<String> = [
        Qualifier::Null,
        Qualifier::PrimaryKey,
        Qualifier::AutoIncrement,
        Qualifier::CharacterSet("utf8".to_string()),
        Qualifier::Collate("utf8_bin".to_string()),
        Qualifier::UniqueKey,
        Qualifier::Key,
    ]
    .iter()
    .map(|q| ddl::build_qualifier(q, &generator))
    .collect();

    assert_eq!(
        rendered,
        vec![
            "NULL",
            "PRIMARY KEY",
            "AUTO_INCREMENT",
            "CHARACTER SET utf8",
            "COLLATE utf8_bin",
            "UNIQUE KEY",
            "KEY",
        ]
    );
}

// ========================================================================
// Round trip
// ========================================================================

#[test]
fn test_create_table_round_trip() {
    let source = r"CREATE TABLE `accounts` (
        `id` BIGINT(20) UNSIGNED NOT NULL AUTO_INCREMENT,
        `email` VARCHAR(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL UNIQUE KEY,
        `bio` TEXT NULL DEFAULT 'it''s a \\ test',
        `flags` BIT(8) DEFAULT b'1010',
        `rate` VARCHAR(8) DEFAULT '50\%',
        `created` TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        `price` DECIMAL(10,2) DEFAULT 0.00 KEY,
        PRIMARY KEY USING BTREE (`id`),
        UNIQUE KEY `email_bio` (`email`, `bio`(10)),
        FULLTEXT KEY `ft` (`bio`),
        SPATIAL INDEX (`flags`),
        KEY `price_idx` (`price`) USING HASH
    ) ENGINE=InnoDB;";

    let original = schema(source);
    let table = original.tables()[0].definition();
    let rendered = table.to_sql();
    let reparsed = schema(&rendered);
    let copy = reparsed.tables()[0].definition();

    let names = |t: &CreateTable| t.fields.iter().map(|f| f.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(copy), names(table));
    assert_eq!(copy.fields, table.fields);
    for (a, b) in copy.fields.iter().zip(&table.fields) {
        assert_eq!(a.qualifiers, b.qualifiers);
    }
    assert_eq!(copy.indices, table.indices);
    assert!(rendered.contains(r"`rate` VARCHAR(8) DEFAULT '50\\%'"), "{}", rendered);
    assert_eq!(reparsed.tables()[0].indices(), original.tables()[0].indices());
}

//! MySQL DDL grammar.
//!
//! Every rule is a plain function over `&str`; the grammar holds no state
//! and is safe to call from any number of threads at once.

pub mod base;
pub mod ddl;

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, multispace1},
    combinator::{map, opt, value},
    error::context,
    sequence::{preceded, terminated, tuple},
};

use self::base::*;
use self::ddl::create_table;
use crate::parser::tree::RawStatement;

/// Parse one top-level statement. Leading whitespace must already be
/// consumed.
pub fn statement(input: &str) -> PResult<'_, RawStatement<'_>> {
    alt((
        map(comment, RawStatement::Comment),
        use_statement,
        set_statement,
        drop_table,
        create_database,
        map(create_table, RawStatement::CreateTable),
        alter_table,
        insert,
        delimiter,
        value(RawStatement::Empty, char(';')),
    ))(input)
}

/// `USE db;`
fn use_statement(input: &str) -> PResult<'_, RawStatement<'_>> {
    map(
        preceded(
            tuple((keyword("use"), ws1)),
            context("USE", terminated(identifier, statement_end)),
        ),
        |database| RawStatement::Use { database },
    )(input)
}

/// `SET ...;`
fn set_statement(input: &str) -> PResult<'_, RawStatement<'_>> {
    map(
        terminated(preceded(keyword("set"), opaque), statement_end),
        RawStatement::Set,
    )(input)
}

/// `DROP TABLE ...;`
fn drop_table(input: &str) -> PResult<'_, RawStatement<'_>> {
    map(
        terminated(preceded(keywords("drop table"), opaque), statement_end),
        RawStatement::DropTable,
    )(input)
}

/// `CREATE DATABASE|SCHEMA [IF NOT EXISTS] name ...;`
fn create_database(input: &str) -> PResult<'_, RawStatement<'_>> {
    let (input, _) = tuple((
        keyword("create"),
        ws1,
        alt((keyword("database"), keyword("schema"))),
        opt(preceded(ws1, keywords("if not exists"))),
        ws1,
    ))(input)?;
    let (input, name) = terminated(identifier, terminated(opaque, statement_end))(input)?;

    Ok((input, RawStatement::CreateDatabase { name }))
}

/// `ALTER TABLE name ...;`, kept as text.
fn alter_table(input: &str) -> PResult<'_, RawStatement<'_>> {
    let (input, _) = tuple((keywords("alter table"), ws1))(input)?;
    let (input, table) = identifier(input)?;
    let (input, body) = terminated(opaque, statement_end)(input)?;

    Ok((input, RawStatement::AlterTable { table, body }))
}

/// `INSERT ...;`
fn insert(input: &str) -> PResult<'_, RawStatement<'_>> {
    map(
        terminated(preceded(keyword("insert"), opaque), statement_end),
        RawStatement::Insert,
    )(input)
}

/// `DELIMITER token`, no terminating `;`.
fn delimiter(input: &str) -> PResult<'_, RawStatement<'_>> {
    map(
        preceded(tuple((keyword("delimiter"), multispace1)), is_not(" \t\r\n")),
        RawStatement::Delimiter,
    )(input)
}

//! `CREATE TABLE` and its create-definitions.
//!
//! Alternatives are ordered most-specific-first: index definitions are
//! tried before field definitions, `PRIMARY KEY` before `KEY`, and `NOT NULL`
//! before `NULL`. Alternation is ordered, not longest-match.

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1, take_while_m_n},
    character::complete::{char, digit0, digit1, one_of},
    combinator::{cut, map, not, opt, recognize, value},
    error::context,
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::base::*;
use crate::ast::IndexStructure;
use crate::parser::tree::*;

/// `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name (...) [options];`
pub fn create_table(input: &str) -> PResult<'_, RawCreateTable<'_>> {
    let (input, _) = keyword("create")(input)?;
    let (input, temporary) = opt(preceded(ws1, keyword("temporary")))(input)?;
    let (input, _) = preceded(ws1, keyword("table"))(input)?;
    let (input, if_not_exists) = opt(preceded(ws1, keywords("if not exists")))(input)?;
    let (input, _) = ws1(input)?;

    let (input, (name, definitions, options)) = cut(context(
        "CREATE TABLE",
        tuple((
            terminated(identifier, ws0),
            context("create definition list", parenthesized(create_definitions)),
            terminated(many0(preceded(option_separator, table_option)), statement_end),
        )),
    ))(input)?;

    Ok((
        input,
        RawCreateTable {
            temporary: temporary.is_some(),
            if_not_exists: if_not_exists.is_some(),
            name,
            definitions,
            options,
        },
    ))
}

/// Definitions separated by commas. A comma commits to another definition,
/// so errors point at the definition that failed.
fn create_definitions(input: &str) -> PResult<'_, Vec<RawDefinition<'_>>> {
    separated_list1(tuple((ws0, char(','), ws0)), cut(create_definition))(input)
}

pub fn create_definition(input: &str) -> PResult<'_, RawDefinition<'_>> {
    alt((
        map(index_definition, RawDefinition::Index),
        map(foreign_key_definition, RawDefinition::ForeignKey),
        map(context("field definition", field_definition), RawDefinition::Field),
    ))(input)
}

// ============================================================================
// Indices
// ============================================================================

pub fn index_definition(input: &str) -> PResult<'_, RawIndex<'_>> {
    alt((
        preceded(
            pair(opt(constraint_prefix), keywords("primary key")),
            index_body(RawIndexKind::Primary, false),
        ),
        preceded(
            tuple((opt(constraint_prefix), keyword("unique"), opt(preceded(ws1, index_word)))),
            index_body(RawIndexKind::Unique, true),
        ),
        preceded(
            pair(keyword("fulltext"), opt(preceded(ws1, index_word))),
            index_body(RawIndexKind::Fulltext, true),
        ),
        preceded(
            pair(keyword("spatial"), opt(preceded(ws1, index_word))),
            index_body(RawIndexKind::Spatial, true),
        ),
        preceded(index_word, index_body(RawIndexKind::Plain, true)),
    ))(input)
}

/// `KEY` or `INDEX`
fn index_word(input: &str) -> PResult<'_, &str> {
    alt((keyword("key"), keyword("index")))(input)
}

/// `CONSTRAINT [symbol] `
fn constraint_prefix(input: &str) -> PResult<'_, ()> {
    value(
        (),
        tuple((
            keyword("constraint"),
            opt(preceded(
                ws1,
                preceded(
                    not(alt((keyword("primary"), keyword("unique"), keyword("foreign")))),
                    identifier,
                ),
            )),
            ws1,
        )),
    )(input)
}

/// `[name] [[USING] type] (columns) [[USING] type]`, after the index keywords.
fn index_body<'a>(
    kind: RawIndexKind,
    named: bool,
) -> impl FnMut(&'a str) -> PResult<'a, RawIndex<'a>> {
    move |input: &'a str| {
        let (input, name) = if named {
            opt(preceded(ws1, index_name))(input)?
        } else {
            (input, None)
        };
        let (input, structure_before) = opt(preceded(ws1, index_type))(input)?;
        let (input, columns) = preceded(ws0, index_columns)(input)?;
        let (input, structure_after) = opt(preceded(ws1, index_type))(input)?;

        Ok((
            input,
            RawIndex {
                kind,
                name,
                structure_before,
                columns,
                structure_after,
            },
        ))
    }
}

fn index_name(input: &str) -> PResult<'_, &str> {
    preceded(not(keyword("using")), identifier)(input)
}

/// `BTREE`, `USING HASH`, ...
pub fn index_type(input: &str) -> PResult<'_, IndexStructure> {
    preceded(
        opt(pair(keyword("using"), ws1)),
        alt((
            value(IndexStructure::Btree, keyword("btree")),
            value(IndexStructure::Hash, keyword("hash")),
            value(IndexStructure::Rtree, keyword("rtree")),
        )),
    )(input)
}

/// `(col [(len)] [ASC|DESC], ...)`
fn index_columns(input: &str) -> PResult<'_, Vec<&str>> {
    parenthesized(comma_list(terminated(
        identifier,
        pair(
            opt(preceded(ws0, parenthesized(digit1))),
            opt(preceded(ws1, alt((keyword("asc"), keyword("desc"))))),
        ),
    )))(input)
}

/// `[CONSTRAINT [symbol]] FOREIGN KEY [name] (cols) REFERENCES tbl (cols) [options]`
pub fn foreign_key_definition(input: &str) -> PResult<'_, &str> {
    recognize(tuple((
        opt(constraint_prefix),
        keywords("foreign key"),
        opt(preceded(ws1, index_name)),
        ws0,
        index_columns,
        ws1,
        reference_definition,
    )))(input)
}

fn reference_definition(input: &str) -> PResult<'_, ()> {
    value(
        (),
        tuple((
            keyword("references"),
            ws1,
            identifier,
            ws0,
            index_columns,
            many0(preceded(ws1, reference_option)),
        )),
    )(input)
}

fn reference_option(input: &str) -> PResult<'_, &str> {
    alt((
        recognize(tuple((
            keyword("match"),
            ws1,
            alt((keyword("full"), keyword("partial"), keyword("simple"))),
        ))),
        recognize(tuple((
            keyword("on"),
            ws1,
            alt((keyword("delete"), keyword("update"))),
            ws1,
            alt((
                keyword("restrict"),
                keyword("cascade"),
                keywords("set null"),
                keywords("set default"),
                keywords("no action"),
            )),
        ))),
    ))(input)
}

// ============================================================================
// Fields
// ============================================================================

/// `name type[(args)] [type qualifiers] [field qualifiers]`
pub fn field_definition(input: &str) -> PResult<'_, RawField<'_>> {
    let (input, name) = identifier(input)?;
    let (input, _) = ws1(input)?;
    let (input, type_name) = bare_identifier(input)?;
    let (input, type_args) = opt(preceded(ws0, parenthesized(comma_list(type_arg))))(input)?;
    let (input, type_qualifiers) = many0(preceded(ws1, type_qualifier))(input)?;
    let (input, qualifiers) = many0(preceded(ws1, field_qualifier))(input)?;

    Ok((
        input,
        RawField {
            name,
            type_name,
            type_args: type_args.unwrap_or_default(),
            type_qualifiers,
            qualifiers,
        },
    ))
}

/// A number, quoted string, or bare word inside a type's parentheses.
fn type_arg(input: &str) -> PResult<'_, &str> {
    alt((
        recognize(tuple((
            opt(one_of("+-")),
            digit1,
            opt(pair(char('.'), digit0)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        recognize(quoted_string),
        bare_identifier,
    ))(input)
}

fn type_qualifier(input: &str) -> PResult<'_, &str> {
    alt((
        keyword("unsigned"),
        keyword("signed"),
        keyword("zerofill"),
        keyword("binary"),
    ))(input)
}

pub fn field_qualifier(input: &str) -> PResult<'_, RawQualifier<'_>> {
    alt((
        value(RawQualifier::NotNull, keywords("not null")),
        value(RawQualifier::Null, keyword("null")),
        value(RawQualifier::PrimaryKey, keywords("primary key")),
        value(
            RawQualifier::AutoIncrement,
            alt((keyword("auto_increment"), keywords("auto increment"))),
        ),
        map(
            preceded(pair(alt((keywords("character set"), keyword("charset"))), ws1), identifier),
            RawQualifier::CharacterSet,
        ),
        map(preceded(pair(keyword("collate"), ws1), identifier), RawQualifier::Collate),
        value(
            RawQualifier::UniqueKey,
            pair(keyword("unique"), opt(preceded(ws1, index_word))),
        ),
        value(RawQualifier::Key, index_word),
        map(
            preceded(pair(keyword("default"), ws1), context("default value", default_value)),
            RawQualifier::Default,
        ),
        map(
            preceded(pair(keyword("comment"), ws1), quoted_string),
            |(_, body)| RawQualifier::Comment(body),
        ),
        map(
            preceded(pair(keywords("on update"), ws1), default_value),
            RawQualifier::OnUpdate,
        ),
        map(recognize(reference_definition), RawQualifier::References),
    ))(input)
}

/// The value after `DEFAULT`.
pub fn default_value(input: &str) -> PResult<'_, RawDefault<'_>> {
    alt((
        value(
            RawDefault::CurrentTimestamp,
            alt((
                recognize(pair(keyword("current_timestamp"), opt(preceded(ws0, empty_call)))),
                recognize(pair(keyword("now"), preceded(ws0, empty_call))),
            )),
        ),
        map(quoted_string, |(quote, body)| RawDefault::Quoted { quote, body }),
        map(
            preceded(
                tag_no_case("b"),
                delimited(
                    char('\''),
                    take_while_m_n(1, 64, |c| c == '0' || c == '1'),
                    char('\''),
                ),
            ),
            RawDefault::Bit,
        ),
        map(
            take_while1(|c: char| is_word_char(c) || matches!(c, ':' | '.' | '-')),
            RawDefault::Token,
        ),
    ))(input)
}

/// `()` or `(precision)`
fn empty_call(input: &str) -> PResult<'_, &str> {
    recognize(tuple((char('('), ws0, opt(digit1), ws0, char(')'))))(input)
}

// ============================================================================
// Table options
// ============================================================================

fn option_separator(input: &str) -> PResult<'_, ()> {
    value((), tuple((ws0, opt(char(',')), ws0)))(input)
}

/// `[DEFAULT] name [=] value`
pub fn table_option(input: &str) -> PResult<'_, RawTableOption<'_>> {
    let (input, _) = opt(pair(keyword("default"), ws1))(input)?;
    let (input, name) = alt((keywords("character set"), bare_identifier))(input)?;
    let (input, _) = tuple((ws0, opt(char('=')), ws0))(input)?;
    let (input, value) = alt((
        recognize(quoted_string),
        take_while1(|c: char| is_word_char(c) || matches!(c, '.' | '-')),
    ))(input)?;

    Ok((input, RawTableOption { name, value }))
}

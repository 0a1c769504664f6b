//! Normalize the concrete parse tree into canonical statements.

use crate::ast::*;
use crate::parser::tree::*;

/// Rewrite a parse tree into canonical statements, one per raw statement.
pub fn normalize(tree: &[RawStatement<'_>]) -> Vec<Statement> {
    tree.iter().map(normalize_statement).collect()
}

fn normalize_statement(raw: &RawStatement<'_>) -> Statement {
    match raw {
        RawStatement::Use { database } => Statement::DatabaseReference {
            name: unquote(database).to_string(),
        },
        RawStatement::CreateDatabase { name } => Statement::DatabaseReference {
            name: unquote(name).to_string(),
        },
        RawStatement::CreateTable(table) => Statement::CreateTable(normalize_table(table)),
        RawStatement::Comment(_)
        | RawStatement::Set(_)
        | RawStatement::DropTable(_)
        | RawStatement::AlterTable { .. }
        | RawStatement::Insert(_)
        | RawStatement::Delimiter(_)
        | RawStatement::Empty => Statement::Ignored,
    }
}

fn normalize_table(raw: &RawCreateTable<'_>) -> CreateTable {
    let mut fields = Vec::new();
    let mut indices = Vec::new();

    for definition in &raw.definitions {
        match definition {
            RawDefinition::Field(field) => fields.push(normalize_field(field)),
            RawDefinition::Index(index) => indices.push(normalize_index(index)),
            RawDefinition::ForeignKey(_) => {}
        }
    }

    CreateTable {
        name: unquote(raw.name).to_string(),
        fields,
        indices,
    }
}

fn normalize_field(raw: &RawField<'_>) -> Field {
    Field {
        name: unquote(raw.name).to_string(),
        data_type: raw.type_name.to_lowercase(),
        type_args: raw.type_args.iter().map(|arg| arg.trim().to_string()).collect(),
        qualifiers: raw.qualifiers.iter().filter_map(normalize_qualifier).collect(),
    }
}

/// `None` for syntax that is recognized but not modeled.
fn normalize_qualifier(raw: &RawQualifier<'_>) -> Option<Qualifier> {
    let qualifier = match raw {
        RawQualifier::NotNull => Qualifier::NotNull,
        RawQualifier::Null => Qualifier::Null,
        RawQualifier::PrimaryKey => Qualifier::PrimaryKey,
        RawQualifier::AutoIncrement => Qualifier::AutoIncrement,
        RawQualifier::CharacterSet(name) => Qualifier::CharacterSet(unquote(name).to_string()),
        RawQualifier::Collate(name) => Qualifier::Collate(unquote(name).to_string()),
        RawQualifier::UniqueKey => Qualifier::UniqueKey,
        RawQualifier::Key => Qualifier::Key,
        RawQualifier::Default(value) => Qualifier::Default(classify_default(value)),
        RawQualifier::Comment(_) | RawQualifier::OnUpdate(_) | RawQualifier::References(_) => {
            return None;
        }
    };
    Some(qualifier)
}

fn classify_default(raw: &RawDefault<'_>) -> DefaultValue {
    match raw {
        RawDefault::CurrentTimestamp => DefaultValue::CurrentTimestamp,
        RawDefault::Quoted { quote, body } => DefaultValue::StringLiteral(unescape(body, *quote)),
        RawDefault::Bit(digits) => match u64::from_str_radix(digits, 2) {
            Ok(bits) => DefaultValue::BitLiteral(bits),
            // The grammar only admits 1 to 64 binary digits.
            Err(_) => DefaultValue::Unclassified(format!("b'{}'", digits)),
        },
        RawDefault::Token(token) => DefaultValue::Unclassified(token.to_string()),
    }
}

fn normalize_index(raw: &RawIndex<'_>) -> Index {
    let mut index = Index::new(raw.columns.iter().map(|c| unquote(c).to_string()).collect());
    index.name = raw.name.map(|name| unquote(name).to_string());
    // Later wins: a structure after the column list overrides one before it.
    index.structure = raw.structure_after.or(raw.structure_before);

    match raw.kind {
        RawIndexKind::Primary => index.primary = true,
        RawIndexKind::Unique => index.unique = true,
        RawIndexKind::Fulltext => index.fulltext = true,
        RawIndexKind::Spatial => index.spatial = true,
        RawIndexKind::Plain => {}
    }
    index
}

/// Strip one pair of matching backtick, single or double quotes.
pub fn unquote(ident: &str) -> &str {
    let ident = ident.trim();
    let mut chars = ident.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && matches!(open, '`' | '\'' | '"') => {
            &ident[1..ident.len() - 1]
        }
        _ => ident,
    }
}

/// Resolve backslash escapes and doubled quotes in a quoted string body.
pub fn unescape(body: &str, quote: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('Z') => out.push('\u{1a}'),
                // Only LIKE patterns treat these as escapes.
                Some(other @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(other);
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else if c == quote && chars.peek() == Some(&quote) {
            chars.next();
            out.push(quote);
        } else {
            out.push(c);
        }
    }
    out
}

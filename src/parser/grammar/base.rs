//! Lexical building blocks shared by every grammar rule.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case, take_until, take_while, take_while1},
    character::complete::{char, multispace1, one_of, satisfy},
    combinator::{map, not, recognize, value},
    error::{ErrorKind, ParseError, VerboseError},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

/// Result type of every grammar rule.
pub type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `# ...` or `-- ...` up to (not including) the end of line.
pub fn line_comment(input: &str) -> PResult<'_, &str> {
    recognize(pair(alt((tag("#"), tag("--"))), take_while(|c| c != '\n')))(input)
}

/// `/* ... */`
pub fn block_comment(input: &str) -> PResult<'_, &str> {
    recognize(tuple((tag("/*"), take_until("*/"), tag("*/"))))(input)
}

pub fn comment(input: &str) -> PResult<'_, &str> {
    alt((line_comment, block_comment))(input)
}

/// Optional whitespace; comments count as whitespace.
pub fn ws0(input: &str) -> PResult<'_, ()> {
    value((), many0(alt((multispace1, comment))))(input)
}

/// Mandatory whitespace; comments count as whitespace.
pub fn ws1(input: &str) -> PResult<'_, ()> {
    value((), many1(alt((multispace1, comment))))(input)
}

/// Case-insensitive keyword that must not run into a following word
/// character, so `key` never matches the start of `keys`.
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    terminated(tag_no_case(word), not(satisfy(is_word_char)))
}

/// A phrase of keywords separated by any whitespace, e.g. `"primary key"`.
pub fn keywords<'a>(phrase: &'static str) -> impl FnMut(&'a str) -> PResult<'a, &'a str> {
    move |input: &'a str| {
        let mut rest = input;
        for (i, word) in phrase.split_whitespace().enumerate() {
            if i > 0 {
                rest = ws1(rest)?.0;
            }
            rest = keyword(word)(rest)?.0;
        }
        Ok((rest, &input[..input.len() - rest.len()]))
    }
}

pub fn bare_identifier(input: &str) -> PResult<'_, &str> {
    take_while1(is_word_char)(input)
}

/// A backtick-, single- or double-quoted identifier, quotes included.
pub fn quoted_identifier(input: &str) -> PResult<'_, &str> {
    recognize(alt((
        delimited(char('`'), take_while1(|c| c != '`'), char('`')),
        delimited(char('\''), take_while1(|c| c != '\''), char('\'')),
        delimited(char('"'), take_while1(|c| c != '"'), char('"')),
    )))(input)
}

pub fn identifier(input: &str) -> PResult<'_, &str> {
    alt((quoted_identifier, bare_identifier))(input)
}

/// A string quoted with `quote`, returning the body with escapes intact.
///
/// Both `\x` and a doubled quote character escape.
pub fn quoted_body<'a>(quote: char) -> impl Fn(&'a str) -> PResult<'a, &'a str> {
    move |input: &'a str| {
        let (rest, _) = char::<&str, VerboseError<&str>>(quote)(input)?;
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == quote {
                let after = &rest[i + c.len_utf8()..];
                if after.starts_with(quote) {
                    chars.next();
                } else {
                    return Ok((after, &rest[..i]));
                }
            }
        }
        Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Char,
        )))
    }
}

/// A single- or double-quoted string, returning `(quote, body)`.
pub fn quoted_string(input: &str) -> PResult<'_, (char, &str)> {
    alt((
        map(quoted_body('\''), |body| ('\'', body)),
        map(quoted_body('"'), |body| ('"', body)),
    ))(input)
}

/// Everything up to the next `;`, skipping over quoted spans and comments.
pub fn opaque(input: &str) -> PResult<'_, &str> {
    recognize(many0(alt((
        value((), comment),
        value((), quoted_body('\'')),
        value((), quoted_body('"')),
        value((), quoted_body('`')),
        value((), is_not(";'\"`#-/")),
        // `-` or `/` that opens no comment
        value((), one_of("-/")),
    ))))(input)
}

pub fn statement_end(input: &str) -> PResult<'_, ()> {
    value((), preceded(ws0, char(';')))(input)
}

/// `( inner )`, whitespace allowed inside the parentheses.
pub fn parenthesized<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(pair(char('('), ws0), inner, pair(ws0, char(')')))
}

/// One or more `item`s separated by commas.
pub fn comma_list<'a, O, F>(item: F) -> impl FnMut(&'a str) -> PResult<'a, Vec<O>>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    separated_list1(tuple((ws0, char(','), ws0)), item)
}

use super::{Modifier, Operator, TemplateError, VarSpec};

use smallvec::SmallVec;

const OPEN: char = '{';
const CLOSE: char = '}';
const COMMA: char = ',';
const STAR: char = '*';
const COLON: char = ':';

const MAX_PREFIX: u16 = 9999;

#[derive(Debug)]
pub(super) enum Part<'t> {
    Literal(&'t str),
    Expression(Expression),
}

#[derive(Debug)]
pub(super) struct Expression {
    pub(super) operator: Operator,
    pub(super) vars: SmallVec<[VarSpec; 4]>,
}

pub(super) fn parse(template: &str) -> Result<Vec<Part<'_>>, TemplateError> {
    let err = |position: usize, msg: &'static str| TemplateError::new(template, position, msg);

    let mut parts: Vec<Part<'_>> = Vec::new();
    let mut names: SmallVec<[Box<str>; 8]> = SmallVec::new();
    let mut rest = template;
    let mut offset = 0;

    while !rest.is_empty() {
        let open = match rest.find(OPEN) {
            Some(i) => i,
            None => {
                if let Some(i) = rest.find(CLOSE) {
                    return Err(err(offset + i, "unmatched '}'"));
                }
                parts.push(Part::Literal(rest));
                break;
            }
        };

        let literal = &rest[..open];
        if let Some(i) = literal.find(CLOSE) {
            return Err(err(offset + i, "unmatched '}'"));
        }
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        let position = offset + open;
        let body_start = open + OPEN.len_utf8();
        let close = match rest[body_start..].find(CLOSE) {
            Some(i) => body_start + i,
            None => return Err(err(position, "unclosed expression")),
        };
        let body = &rest[body_start..close];
        if body.contains(OPEN) {
            return Err(err(position, "nested '{' in expression"));
        }

        let expr = parse_expression(body).map_err(|msg| err(position, msg))?;
        for var in expr.vars.iter() {
            if names.contains(&var.name) {
                return Err(err(position, "duplicate variable name"));
            }
            names.push(var.name.clone());
        }
        parts.push(Part::Expression(expr));

        let next = close + CLOSE.len_utf8();
        offset += next;
        rest = &rest[next..];
    }

    Ok(parts)
}

fn parse_expression(body: &str) -> Result<Expression, &'static str> {
    let first = match body.chars().next() {
        Some(c) => c,
        None => return Err("empty expression"),
    };

    let operator = match first {
        '+' => Some(Operator::Reserved),
        '.' => Some(Operator::Label),
        '/' => Some(Operator::PathSegment),
        ';' | '?' | '&' | '#' => return Err("unsupported operator"),
        '=' | ',' | '!' | '@' | '|' => return Err("reserved operator"),
        _ => None,
    };
    let list = match operator {
        Some(_) => &body[first.len_utf8()..],
        None => body,
    };
    let operator = operator.unwrap_or(Operator::Simple);

    if list.is_empty() {
        return Err("empty variable list");
    }

    let mut vars: SmallVec<[VarSpec; 4]> = SmallVec::new();
    for token in list.split(COMMA) {
        let (name, modifier) = parse_varspec(token)?;
        vars.push(VarSpec {
            name: name.into(),
            operator,
            modifier,
        });
    }

    Ok(Expression { operator, vars })
}

fn parse_varspec(token: &str) -> Result<(&str, Modifier), &'static str> {
    let (name, modifier) = if let Some(name) = token.strip_suffix(STAR) {
        if name.contains(COLON) {
            return Err("explode can not be combined with a prefix modifier");
        }
        (name, Modifier::Explode)
    } else if let Some(i) = token.find(COLON) {
        let len = &token[i + COLON.len_utf8()..];
        if len.is_empty() || len.len() > 4 || !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err("invalid prefix length");
        }
        let len: u16 = len.parse().map_err(|_| "invalid prefix length")?;
        if len == 0 || len > MAX_PREFIX {
            return Err("invalid prefix length");
        }
        (&token[..i], Modifier::Prefix(len))
    } else {
        (token, Modifier::None)
    };

    if name.is_empty() {
        return Err("variable name can not be empty");
    }
    if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return Err("invalid character in variable name");
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
    {
        return Err("invalid character in variable name");
    }

    Ok((name, modifier))
}

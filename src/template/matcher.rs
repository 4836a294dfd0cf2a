use super::parse::{Expression, Part};
use super::{Modifier, Operator, TemplateError, VarSpec};
use crate::captures::{Captures, Value};

use std::borrow::Cow;

use regex::Regex;

const UNRESERVED: &str = r"A-Za-z0-9\-._~";
const UNRESERVED_NO_DOT: &str = r"A-Za-z0-9\-_~";
const RESERVED: &str = r":/?#\[\]@!$&'()*+,;=";
const PCT_ENCODED: &str = "%[0-9A-Fa-f]{2}";

pub(super) fn build(
    template: &str,
    parts: Vec<Part<'_>>,
) -> Result<(Regex, Vec<VarSpec>), TemplateError> {
    let mut pattern = String::with_capacity(template.len() * 4 + 2);
    let mut vars: Vec<VarSpec> = Vec::new();

    pattern.push('^');
    for part in parts {
        match part {
            Part::Literal(s) => pattern.push_str(&regex::escape(s)),
            Part::Expression(Expression {
                operator,
                vars: specs,
            }) => {
                for (i, spec) in specs.into_iter().enumerate() {
                    match operator.prefix() {
                        Some(c) => push_literal(&mut pattern, c),
                        None if i > 0 => pattern.push(','),
                        None => {}
                    }
                    pattern.push('(');
                    pattern.push_str(&value_pattern(operator, spec.modifier));
                    pattern.push(')');
                    vars.push(spec);
                }
            }
        }
    }
    pattern.push('$');

    match Regex::new(&pattern) {
        Ok(regex) => Ok((regex, vars)),
        Err(_) => Err(TemplateError::new(
            template,
            0,
            "template is too large to compile",
        )),
    }
}

pub(super) fn match_target(regex: &Regex, vars: &[VarSpec], target: &str) -> Option<Captures> {
    let caps = regex.captures(target)?;

    let mut captures = Captures::with_capacity(vars.len());
    for (i, spec) in vars.iter().enumerate() {
        let raw = caps.get(i + 1).map_or("", |m| m.as_str());
        let value = match spec.modifier {
            Modifier::Explode => {
                let items: Vec<String> = raw
                    .split(spec.operator.separator())
                    .map(decode)
                    .collect::<Option<_>>()?;
                Value::List(items)
            }
            Modifier::None | Modifier::Prefix(_) => Value::Single(decode(raw)?),
        };
        captures.push(spec.name.clone(), value);
    }
    Some(captures)
}

fn value_pattern(operator: Operator, modifier: Modifier) -> String {
    let class: Cow<'static, str> = match operator {
        Operator::Simple | Operator::PathSegment => UNRESERVED.into(),
        Operator::Label => UNRESERVED_NO_DOT.into(),
        Operator::Reserved => format!("{}{}", UNRESERVED, RESERVED).into(),
    };
    let unit = format!("(?:[{}]|{})", class, PCT_ENCODED);

    match modifier {
        Modifier::None => format!("{}*", unit),
        Modifier::Prefix(n) => format!("{}{{0,{}}}", unit, n),
        Modifier::Explode => {
            let mut sep = String::new();
            push_literal(&mut sep, operator.separator());
            format!("{unit}*(?:{sep}{unit}*)*", unit = unit, sep = sep)
        }
    }
}

fn push_literal(pattern: &mut String, c: char) {
    let mut buf = [0; 4];
    pattern.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

fn decode(raw: &str) -> Option<String> {
    if !raw.contains('%') {
        return Some(raw.to_owned());
    }
    urlencoding::decode(raw).ok().map(Cow::into_owned)
}

//! URI templates (a matching-side subset of RFC 6570).
//!
//! A template such as `/cats/{id}` or `{/path*}` is compiled once into an
//! anchored regular expression plus the ordered list of its variables.
//! Matching a request target then yields the decoded [`Captures`].
//!
//! Supported expressions: `{var}`, `{+var}`, `{.var}`, `{/var}`, lists such
//! as `{a,b,c}`, explode (`{var*}`) and prefix (`{var:3}`) modifiers.

mod matcher;
mod parse;

use crate::captures::Captures;

use std::fmt;
use std::str::FromStr;

use regex::Regex;

#[derive(Debug, Clone)]
pub struct UriTemplate {
    source: Box<str>,
    regex: Regex,
    vars: Vec<VarSpec>,
}

/// Expression operator, the character right after `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `{var}`
    Simple,
    /// `{+var}`: reserved characters may appear unencoded.
    Reserved,
    /// `{.var}`: each value is preceded by `.`.
    Label,
    /// `{/var}`: each value is preceded by `/`.
    PathSegment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    /// `{var*}`
    Explode,
    /// `{var:N}`
    Prefix(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    name: Box<str>,
    operator: Operator,
    modifier: Modifier,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{msg} at byte {position}: template = {template:?}")]
pub struct TemplateError {
    template: Box<str>,
    position: usize,
    msg: &'static str,
}

impl UriTemplate {
    pub fn compile(template: &str) -> Result<Self, TemplateError> {
        let parts = parse::parse(template)?;
        let (regex, vars) = matcher::build(template, parts)?;
        Ok(Self {
            source: template.into(),
            regex,
            vars,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn variables(&self) -> impl ExactSizeIterator<Item = &VarSpec> + '_ {
        self.vars.iter()
    }

    pub fn is_match(&self, target: &str) -> bool {
        self.match_target(target).is_some()
    }

    /// Matches the whole `target` and decodes the captured values.
    ///
    /// Returns `None` when the target does not match, including targets with
    /// malformed percent-encoding or encoded bytes that are not UTF-8.
    pub fn match_target(&self, target: &str) -> Option<Captures> {
        matcher::match_target(&self.regex, &self.vars, target)
    }
}

impl FromStr for UriTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl VarSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    pub fn is_explode(&self) -> bool {
        self.modifier == Modifier::Explode
    }
}

impl Operator {
    /// Character emitted before every value, if any.
    pub(crate) fn prefix(self) -> Option<char> {
        match self {
            Self::Simple | Self::Reserved => None,
            Self::Label => Some('.'),
            Self::PathSegment => Some('/'),
        }
    }

    /// Character between exploded list items.
    pub(crate) fn separator(self) -> char {
        self.prefix().unwrap_or(',')
    }
}

impl TemplateError {
    pub(crate) fn new(template: &str, position: usize, msg: &'static str) -> Self {
        Self {
            template: template.into(),
            position,
            msg,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Byte offset of the offending expression.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn message(&self) -> &'static str {
        self.msg
    }
}

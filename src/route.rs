use crate::captures::{Captures, Value};
use crate::error::RouterError;
use crate::method_map::{Dispatch, MethodMap};
use crate::template::UriTemplate;

use http::Method;
use regex::{Regex, RegexBuilder};

const SLASH: char = '/';
const STAR: char = '*';
const OPEN: char = '{';
const CLOSE: char = '}';

/// A registered target together with the verbs it accepts.
#[derive(Debug, Clone)]
pub struct Route<T> {
    target: Box<str>,
    matcher: Matcher,
    methods: MethodMap<T>,
}

/// How a route decides whether a request target belongs to it.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact string equality.
    Static(Box<str>),
    /// Registered as `"<prefix>*"`, matches any target starting with the prefix.
    Prefix(Box<str>),
    Template(UriTemplate),
    /// Delimiter-wrapped regular expression such as `~/cat/([0-9]+)~i`.
    Regex(Regex),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Static,
    Prefix,
    Template,
    Regex,
}

impl<T> Route<T> {
    pub fn new(target: &str) -> Result<Self, RouterError> {
        Self::with_methods(target, MethodMap::new())
    }

    pub fn with_methods(target: &str, methods: MethodMap<T>) -> Result<Self, RouterError> {
        Ok(Self {
            target: target.into(),
            matcher: Matcher::new(target)?,
            methods,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> RouteKind {
        self.matcher.kind()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn methods(&self) -> &MethodMap<T> {
        &self.methods
    }

    pub fn methods_mut(&mut self) -> &mut MethodMap<T> {
        &mut self.methods
    }

    pub fn match_target(&self, target: &str) -> Option<Captures> {
        self.matcher.match_target(target)
    }

    pub fn dispatch(&self, method: &Method) -> Dispatch<'_, T> {
        self.methods.dispatch(method)
    }

    pub(crate) fn set_methods(&mut self, methods: MethodMap<T>) {
        self.methods = methods;
    }
}

impl Matcher {
    /// Classifies `target`.
    ///
    /// Targets starting with `/` are prefix routes when they end with `*`,
    /// templates when they contain braces and static otherwise. Anything else
    /// is a delimiter-wrapped regular expression.
    pub fn new(target: &str) -> Result<Self, RouterError> {
        if target.is_empty() {
            return Err(RouterError::EmptyTarget);
        }
        if !target.starts_with(SLASH) {
            return parse_delimited(target).map(Self::Regex);
        }
        if let Some(prefix) = target.strip_suffix(STAR) {
            return Ok(Self::Prefix(prefix.into()));
        }
        if target.contains(OPEN) || target.contains(CLOSE) {
            return Ok(Self::Template(UriTemplate::compile(target)?));
        }
        Ok(Self::Static(target.into()))
    }

    pub fn kind(&self) -> RouteKind {
        match self {
            Self::Static(_) => RouteKind::Static,
            Self::Prefix(_) => RouteKind::Prefix,
            Self::Template(_) => RouteKind::Template,
            Self::Regex(_) => RouteKind::Regex,
        }
    }

    pub fn is_match(&self, target: &str) -> bool {
        match self {
            Self::Static(path) => **path == *target,
            Self::Prefix(prefix) => target.starts_with(&**prefix),
            Self::Template(t) => t.is_match(target),
            Self::Regex(re) => re.is_match(target),
        }
    }

    pub fn match_target(&self, target: &str) -> Option<Captures> {
        match self {
            Self::Static(_) | Self::Prefix(_) => {
                if self.is_match(target) {
                    Some(Captures::new())
                } else {
                    None
                }
            }
            Self::Template(t) => t.match_target(target),
            Self::Regex(re) => {
                let caps = re.captures(target)?;
                let mut captures = Captures::with_capacity(caps.len());
                for (i, group) in caps.iter().enumerate() {
                    let value = group.map_or("", |m| m.as_str());
                    captures.push(i.to_string().into(), Value::from(value));
                }
                Some(captures)
            }
        }
    }
}

fn parse_delimited(target: &str) -> Result<Regex, RouterError> {
    let err = |msg| RouterError::regex_delimiter(target, msg);

    let open = match target.chars().next() {
        Some(c) => c,
        None => return Err(RouterError::EmptyTarget),
    };
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return Err(err("delimiter must not be alphanumeric, backslash or whitespace"));
    }
    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        c => c,
    };

    let rest = &target[open.len_utf8()..];
    let end = match rest.rfind(close) {
        Some(i) => i,
        None => return Err(err("missing closing delimiter")),
    };
    let (body, flags) = (&rest[..end], &rest[end + close.len_utf8()..]);

    let mut builder = RegexBuilder::new(body);
    for flag in flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'U' => builder.swap_greed(true),
            'u' => &mut builder,
            _ => return Err(err("unknown regex flag")),
        };
    }
    Ok(builder.build()?)
}

use crate::error::RouterError;

use std::fmt;

use http::header::{HeaderMap, HeaderValue, ALLOW};
use http::{Method, Response, StatusCode};
use smallvec::SmallVec;
use tracing::debug;

const WILDCARD: &str = "*";
const COMMA: char = ',';

/// Per-route table from HTTP verb to handler.
///
/// Verbs are compared case-sensitively, so `GET` and `get` are two separate
/// entries. The `*` wildcard lives in its own slot and is only consulted
/// after exact verbs, `HEAD`-as-`GET` and `OPTIONS`.
#[derive(Debug, Clone)]
pub struct MethodMap<T> {
    exact: SmallVec<[(Method, T); 4]>,
    wildcard: Option<T>,
}

/// Outcome of resolving a verb against a [`MethodMap`].
#[derive(Debug)]
pub enum Dispatch<'a, T> {
    Handler(&'a T),
    /// Automatic `OPTIONS` response: 200 with an `Allow` header.
    Options(AllowSet),
    /// 405 with an `Allow` header.
    MethodNotAllowed(AllowSet),
}

/// Verbs a route accepts, as advertised in the `Allow` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowSet {
    methods: SmallVec<[Method; 8]>,
}

enum Selector {
    Exact(Method),
    Wildcard,
}

impl<T> Default for MethodMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MethodMap<T> {
    pub fn new() -> Self {
        Self {
            exact: SmallVec::new(),
            wildcard: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcard.is_none()
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.get(method).is_some()
    }

    pub fn get(&self, method: &Method) -> Option<&T> {
        self.exact
            .iter()
            .find_map(|(m, h)| if m == method { Some(h) } else { None })
    }

    pub fn wildcard(&self) -> Option<&T> {
        self.wildcard.as_ref()
    }

    /// Sets the handler for one verb, replacing any previous one in place.
    pub fn set(&mut self, method: Method, handler: T) -> &mut Self {
        match self.exact.iter_mut().find(|(m, _)| *m == method) {
            Some(entry) => entry.1 = handler,
            None => self.exact.push((method, handler)),
        }
        self
    }

    pub fn set_wildcard(&mut self, handler: T) -> &mut Self {
        self.wildcard = Some(handler);
        self
    }

    pub fn remove(&mut self, methods: &str) -> Result<&mut Self, RouterError> {
        for selector in parse_methods(methods)? {
            self.unset(&selector);
        }
        Ok(self)
    }

    pub fn allow(&self) -> AllowSet {
        let mut methods: SmallVec<[Method; 8]> =
            self.exact.iter().map(|(m, _)| m.clone()).collect();
        if self.contains(&Method::GET) && !self.contains(&Method::HEAD) {
            methods.push(Method::HEAD);
        }
        if !self.contains(&Method::OPTIONS) {
            methods.push(Method::OPTIONS);
        }
        AllowSet { methods }
    }

    pub fn dispatch(&self, method: &Method) -> Dispatch<'_, T> {
        if let Some(h) = self.get(method) {
            return Dispatch::Handler(h);
        }
        if *method == Method::HEAD {
            if let Some(h) = self.get(&Method::GET) {
                return Dispatch::Handler(h);
            }
        }
        if *method == Method::OPTIONS {
            return Dispatch::Options(self.allow());
        }
        match self.wildcard {
            Some(ref h) => Dispatch::Handler(h),
            None => Dispatch::MethodNotAllowed(self.allow()),
        }
    }

    fn unset(&mut self, selector: &Selector) {
        match selector {
            Selector::Exact(method) => self.exact.retain(|(m, _)| m != method),
            Selector::Wildcard => self.wildcard = None,
        }
    }
}

impl<T: Clone> MethodMap<T> {
    /// Registers `handler` for `methods`: one verb, a comma-separated list
    /// or `*`. Passing `None` removes the listed entries.
    pub fn register(&mut self, methods: &str, handler: impl Into<Option<T>>) -> &mut Self {
        if let Err(e) = self.try_register(methods, handler) {
            panic!("{}: methods = {:?}", e, methods);
        }
        self
    }

    pub fn try_register(
        &mut self,
        methods: &str,
        handler: impl Into<Option<T>>,
    ) -> Result<&mut Self, RouterError> {
        let selectors = parse_methods(methods)?;
        let handler = match handler.into() {
            Some(h) => h,
            None => {
                debug!(methods, "unregistering methods");
                for selector in selectors.iter() {
                    self.unset(selector);
                }
                return Ok(self);
            }
        };

        debug!(methods, "registering methods");
        for selector in selectors {
            match selector {
                Selector::Exact(method) => self.set(method, handler.clone()),
                Selector::Wildcard => self.set_wildcard(handler.clone()),
            };
        }
        Ok(self)
    }
}

fn parse_methods(methods: &str) -> Result<SmallVec<[Selector; 4]>, RouterError> {
    methods
        .split(COMMA)
        .map(str::trim)
        .map(|token| {
            if token == WILDCARD {
                return Ok(Selector::Wildcard);
            }
            Method::from_bytes(token.as_bytes())
                .map(Selector::Exact)
                .map_err(|_| RouterError::InvalidMethod(token.into()))
        })
        .collect()
}

impl<'a, T> Dispatch<'a, T> {
    pub fn handler(&self) -> Option<&'a T> {
        match *self {
            Self::Handler(h) => Some(h),
            Self::Options(_) | Self::MethodNotAllowed(_) => None,
        }
    }

    pub fn allow(&self) -> Option<&AllowSet> {
        match self {
            Self::Handler(_) => None,
            Self::Options(allow) | Self::MethodNotAllowed(allow) => Some(allow),
        }
    }

    /// Status of the synthesized response, `None` when a handler runs.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Handler(_) => None,
            Self::Options(_) => Some(StatusCode::OK),
            Self::MethodNotAllowed(_) => Some(StatusCode::METHOD_NOT_ALLOWED),
        }
    }

    /// Writes the status and `Allow` header into `res`.
    ///
    /// Returns `false` and leaves `res` untouched when a handler runs.
    pub fn apply_to<B>(&self, res: &mut Response<B>) -> bool {
        let (status, allow) = match (self.status(), self.allow()) {
            (Some(status), Some(allow)) => (status, allow),
            _ => return false,
        };
        *res.status_mut() = status;
        allow.write_to(res.headers_mut());
        true
    }

    pub fn fallback_response<B: Default>(&self) -> Option<Response<B>> {
        let mut res = Response::new(B::default());
        if self.apply_to(&mut res) {
            Some(res)
        } else {
            None
        }
    }
}

impl AllowSet {
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> + '_ {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn write_to(&self, headers: &mut HeaderMap) {
        // method tokens are always valid header characters
        if let Ok(value) = HeaderValue::from_str(&self.to_string()) {
            headers.insert(ALLOW, value);
        }
    }
}

impl fmt::Display for AllowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.methods.iter();
        if let Some(first) = iter.next() {
            f.write_str(first.as_str())?;
        }
        for method in iter {
            f.write_str(", ")?;
            f.write_str(method.as_str())?;
        }
        Ok(())
    }
}

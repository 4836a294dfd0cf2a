use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Captured value of one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Single(String),
    List(Vec<String>),
}

/// Variables captured by a successful match, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    buf: SmallVec<[(Box<str>, Value); 4]>,
}

impl Captures {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.buf
            .iter()
            .find_map(|(k, v)| if **k == *name { Some(v) } else { None })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        single(self.get(name)?)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        match self.get(name)? {
            Value::List(v) => Some(v),
            Value::Single(_) => None,
        }
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get_str(name).map(T::from_str)
    }

    /// Single value at `index` in capture order.
    ///
    /// For a regex route this is the numbered group, `0` being the whole match.
    pub fn at(&self, index: usize) -> Option<&str> {
        single(&self.buf.get(index)?.1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.buf.iter().map(|(k, v)| (&**k, v))
    }
}

impl Captures {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            buf: SmallVec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, name: Box<str>, value: Value) {
        self.buf.push((name, value));
    }
}

impl Deref for Captures {
    type Target = [(Box<str>, Value)];
    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl IntoIterator for Captures {
    type Item = (Box<str>, Value);
    type IntoIter = smallvec::IntoIter<[(Box<str>, Value); 4]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

fn single(value: &Value) -> Option<&str> {
    match value {
        Value::Single(s) => Some(s),
        Value::List(_) => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Single(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

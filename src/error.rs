use crate::template::TemplateError;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("{msg}: target = {target:?}")]
    RegexDelimiter { target: Box<str>, msg: &'static str },

    #[error("invalid regex route: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid method token: {0:?}")]
    InvalidMethod(Box<str>),

    #[error("route target can not be empty")]
    EmptyTarget,
}

impl RouterError {
    pub(crate) fn regex_delimiter(target: &str, msg: &'static str) -> Self {
        Self::RegexDelimiter {
            target: target.into(),
            msg,
        }
    }
}

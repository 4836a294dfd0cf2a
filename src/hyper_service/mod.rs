mod handler;
mod service;

pub use self::handler::{BoxHandler, Handler};
pub use self::service::RouterService;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type BoxError = Box<dyn StdError + Send + Sync>;

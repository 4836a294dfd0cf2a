#![forbid(unsafe_code)]

//! Request routing with URI templates and per-route method maps.
//!
//! A [`Router`] holds routes in registration order. Each route owns a
//! [`MethodMap`] that picks the handler for a verb or synthesizes the
//! automatic `OPTIONS` and `405 Method Not Allowed` responses.
//!
//! ```
//! use routemap::{Dispatch, Router};
//! use http::Method;
//!
//! let mut router: Router<&str> = Router::new();
//! router
//!     .insert("GET", "/cats", "list")
//!     .insert("GET,PUT,DELETE", "/cats/{id}", "item");
//!
//! let (dispatch, captures) = router.dispatch(&Method::PUT, "/cats/12").unwrap();
//! assert!(matches!(dispatch, Dispatch::Handler(&"item")));
//! assert_eq!(captures.get_str("id"), Some("12"));
//! ```

mod captures;
mod error;
mod method_map;
mod route;
mod router;

pub mod template;

#[cfg(feature = "hyper-service")]
pub mod hyper_service;

pub use self::captures::{Captures, Value};
pub use self::error::RouterError;
pub use self::method_map::{AllowSet, Dispatch, MethodMap};
pub use self::route::{Matcher, Route, RouteKind};
pub use self::router::{Router, SharedRouter};
pub use self::template::{TemplateError, UriTemplate};

pub use http::Method;

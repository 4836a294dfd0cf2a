mod core;
mod imp;
mod router_macro;
mod shared;

pub use self::shared::SharedRouter;

use crate::route::Route;

use std::collections::HashMap;

/// Ordered route table. The first registered route accepting a target wins.
#[derive(Debug, Clone)]
pub struct Router<T> {
    routes: Vec<Route<T>>,
    targets: HashMap<Box<str>, usize>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

use super::Router;

use crate::captures::Captures;
use crate::error::RouterError;
use crate::method_map::{Dispatch, MethodMap};
use crate::route::Route;

use std::collections::HashMap;

use http::Method;
use tracing::trace;

impl<T> Router<T> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            targets: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.targets.clear();
    }

    /// Routes in registration order.
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &Route<T>> + '_ {
        self.routes.iter()
    }

    /// Route registered for exactly this target string.
    pub fn get_route(&self, target: &str) -> Option<&Route<T>> {
        self.targets.get(target).map(|&idx| &self.routes[idx])
    }

    pub fn find(&self, target: &str) -> Option<(&Route<T>, Captures)> {
        match self.find_index(target) {
            Some((idx, captures)) => {
                let route = &self.routes[idx];
                trace!(target_path = %target, route = %route.target(), "route matched");
                Some((route, captures))
            }
            None => {
                trace!(target_path = %target, "no route matched");
                None
            }
        }
    }

    /// Resolves `target` to a route and `method` to that route's handler.
    ///
    /// `None` means no route accepts the target. A matched route always
    /// yields a [`Dispatch`], which may be a synthesized OPTIONS or 405.
    pub fn dispatch(&self, method: &Method, target: &str) -> Option<(Dispatch<'_, T>, Captures)> {
        let (route, captures) = self.find(target)?;
        let dispatch = route.dispatch(method);
        if let Some(status) = dispatch.status() {
            trace!(%method, route = %route.target(), status = status.as_u16(), "synthesized response");
        }
        Some((dispatch, captures))
    }

    /// Route for `target`, created and appended if it is not registered yet.
    pub fn route_mut(&mut self, target: &str) -> Result<&mut Route<T>, RouterError> {
        self.entry(target)
    }

    /// Replaces the whole method map of the route for `target`.
    pub fn insert_method_map(&mut self, target: &str, methods: MethodMap<T>) -> &mut Self {
        if let Err(e) = self.try_insert_method_map(target, methods) {
            panic!("{}: target = {:?}", e, target);
        }
        self
    }

    pub fn try_insert_method_map(
        &mut self,
        target: &str,
        methods: MethodMap<T>,
    ) -> Result<&mut Self, RouterError> {
        self.entry(target)?.set_methods(methods);
        Ok(self)
    }
}

impl<T: Clone> Router<T> {
    pub fn insert(&mut self, methods: &str, target: &str, data: T) -> &mut Self {
        if let Err(e) = self.try_insert(methods, target, data) {
            panic!("{}: methods = {:?}, target = {:?}", e, methods, target);
        }
        self
    }

    pub fn try_insert(
        &mut self,
        methods: &str,
        target: &str,
        data: T,
    ) -> Result<&mut Self, RouterError> {
        match self.targets.get(target) {
            Some(&idx) => {
                self.routes[idx].methods_mut().try_register(methods, data)?;
            }
            None => {
                // a rejected registration must not leave an empty route behind
                let mut route = Route::new(target)?;
                route.methods_mut().try_register(methods, data)?;
                self.push(route);
            }
        }
        Ok(self)
    }
}

use super::Router;

use crate::captures::Captures;
use crate::error::RouterError;
use crate::route::{Route, RouteKind};

use tracing::debug;

impl<T> Router<T> {
    pub(super) fn entry(&mut self, target: &str) -> Result<&mut Route<T>, RouterError> {
        let idx = match self.targets.get(target) {
            Some(&idx) => idx,
            None => self.push(Route::new(target)?),
        };
        Ok(&mut self.routes[idx])
    }

    pub(super) fn push(&mut self, route: Route<T>) -> usize {
        debug!(route = %route.target(), kind = ?route.kind(), "route created");
        let idx = self.routes.len();
        self.targets.insert(route.target().into(), idx);
        self.routes.push(route);
        idx
    }

    pub(super) fn find_index(&self, target: &str) -> Option<(usize, Captures)> {
        // targets are unique, so at most one static route can equal `target`
        // and no static route before it can match
        let limit = match self.targets.get(target) {
            Some(&idx) if self.routes[idx].kind() == RouteKind::Static => idx,
            _ => self.routes.len(),
        };

        let found = self.routes[..limit]
            .iter()
            .enumerate()
            .filter(|(_, route)| route.kind() != RouteKind::Static)
            .find_map(|(idx, route)| route.match_target(target).map(|c| (idx, c)));

        match found {
            Some(hit) => Some(hit),
            None if limit < self.routes.len() => Some((limit, Captures::new())),
            None => None,
        }
    }
}

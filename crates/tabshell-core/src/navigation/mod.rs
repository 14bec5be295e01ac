//! Route table and navigation guard.
//!
//! Routes are plain descriptor records resolved first-match-wins; the guard
//! is a pure function of the target route and the current session.

mod guard;
mod route;

pub use guard::{HOME_PATH, LOGIN_PATH, RedirectDecision, decide};
pub use route::{RouteDescriptor, RouteMatch, RouteMeta, RouteTable, default_routes};

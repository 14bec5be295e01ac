//! Route descriptors and first-match route resolution.
//!
//! Patterns use the familiar router syntax:
//!
//! ```text
//! /login              literal segments
//! /users/:id          one captured segment
//! /files/:rest(.*)    capture with a custom regex
//! /:catchAll(.*)*     repeatable, optional capture (catch-all)
//! ```
//!
//! A parameter may end with `?` (optional), `+` (one or more segments) or
//! `*` (zero or more segments). Custom regexes may not contain `/`.
//!
//! Matching is case-insensitive; captured parameters keep the caller's casing.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShellError};

/// Access flags attached to a route. At most one should be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeta {
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub requires_guest: bool,
}

/// One entry of the route table.
///
/// `view` is an opaque reference to whatever the rendering layer shows for
/// this route; how it gets loaded is not this crate's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub path: String,
    pub view: String,
    #[serde(default)]
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            view: view.into(),
            meta: RouteMeta::default(),
        }
    }

    /// Marks the route as reachable only when logged in.
    pub fn requires_auth(mut self) -> Self {
        self.meta.requires_auth = true;
        self
    }

    /// Marks the route as reachable only when logged out.
    pub fn requires_guest(mut self) -> Self {
        self.meta.requires_guest = true;
        self
    }
}

/// The application's route table: login page, main layout, not-found page.
pub fn default_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("/login", "LoginPage").requires_guest(),
        RouteDescriptor::new("/", "MainLayout").requires_auth(),
        // Must stay last.
        RouteDescriptor::new("/:catchAll(.*)*", "ErrorNotFound"),
    ]
}

/// A resolved route together with the parameters captured from the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    /// Normalized path (no query or fragment).
    pub path: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug)]
struct CompiledRoute {
    descriptor: RouteDescriptor,
    regex: Regex,
    param_names: Vec<String>,
    catch_all: bool,
}

/// Ordered route table. The first pattern that matches wins.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compiles every pattern up front so resolution never fails on syntax.
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self> {
        let compiled = routes
            .into_iter()
            .map(compile)
            .collect::<Result<Vec<_>>>()?;

        if let Some(position) = compiled.iter().position(|route| route.catch_all) {
            if position + 1 != compiled.len() {
                tracing::warn!(
                    pattern = %compiled[position].descriptor.path,
                    "Catch-all route is not last; routes after it are unreachable"
                );
            }
        }

        Ok(Self { routes: compiled })
    }

    /// Finds the first route matching `path`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let path = normalize_path(path);

        self.routes.iter().find_map(|route| {
            let captures = route.regex.captures(&path)?;
            let params = route
                .param_names
                .iter()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|value| (name.clone(), value.as_str().to_string()))
                })
                .collect();

            Some(RouteMatch {
                route: &route.descriptor,
                path: path.clone(),
                params,
            })
        })
    }

    pub fn routes(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter().map(|route| &route.descriptor)
    }

    /// Whether some route matches every path.
    pub fn has_catch_all(&self) -> bool {
        self.routes.iter().any(|route| route.catch_all)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Strips query string and fragment and guarantees a leading slash.
fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn compile(descriptor: RouteDescriptor) -> Result<CompiledRoute> {
    let mut source = String::from("(?i)^");
    let mut param_names = Vec::new();
    let mut literal_segments = 0usize;
    let mut open_ended_params = 0usize;

    for segment in descriptor.path.split('/').filter(|s| !s.is_empty()) {
        let Some(param) = segment.strip_prefix(':') else {
            literal_segments += 1;
            source.push('/');
            source.push_str(&regex::escape(segment));
            continue;
        };

        let param = parse_param(param)
            .map_err(|reason| invalid_pattern(&descriptor.path, &reason))?;
        if param_names.contains(&param.name) {
            return Err(invalid_pattern(
                &descriptor.path,
                &format!("duplicate parameter '{}'", param.name),
            ));
        }

        let pattern = param.pattern.unwrap_or("[^/]+");
        let name = &param.name;
        let piece = match param.modifier {
            None => format!("/(?P<{name}>{pattern})"),
            Some('?') => format!("(?:/(?P<{name}>{pattern}))?"),
            Some('+') => format!("/(?P<{name}>(?:{pattern})(?:/(?:{pattern}))*)"),
            Some('*') => format!("(?:/(?P<{name}>(?:{pattern})(?:/(?:{pattern}))*))?"),
            Some(other) => {
                return Err(invalid_pattern(
                    &descriptor.path,
                    &format!("unknown modifier '{other}'"),
                ));
            }
        };
        source.push_str(&piece);

        if param.modifier == Some('*') && param.pattern == Some(".*") {
            open_ended_params += 1;
        }
        param_names.push(param.name);
    }

    source.push_str("/?$");

    let regex = Regex::new(&source)
        .map_err(|e| invalid_pattern(&descriptor.path, &e.to_string()))?;
    let catch_all = literal_segments == 0
        && open_ended_params > 0
        && open_ended_params == param_names.len();

    Ok(CompiledRoute {
        descriptor,
        regex,
        param_names,
        catch_all,
    })
}

struct ParsedParam<'a> {
    name: String,
    pattern: Option<&'a str>,
    modifier: Option<char>,
}

fn parse_param(raw: &str) -> std::result::Result<ParsedParam<'_>, String> {
    let name_end = raw
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(raw.len());
    let name = &raw[..name_end];
    if name.is_empty() {
        return Err("parameter without a name".to_string());
    }

    let mut rest = &raw[name_end..];
    let mut pattern = None;
    if rest.starts_with('(') {
        let close = matching_paren(rest).ok_or("unbalanced parentheses")?;
        pattern = Some(&rest[1..close]);
        rest = &rest[close + 1..];
    }

    let mut chars = rest.chars();
    let modifier = chars.next();
    if chars.next().is_some() {
        return Err(format!("unexpected trailing characters '{rest}'"));
    }

    Ok(ParsedParam {
        name: name.to_string(),
        pattern,
        modifier,
    })
}

/// Index of the `)` closing the `(` at position 0.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (index, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn invalid_pattern(pattern: &str, reason: &str) -> ShellError {
    ShellError::config(format!("Invalid route pattern '{pattern}': {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(default_routes()).unwrap()
    }

    #[test]
    fn test_default_table_resolves_each_route() {
        let table = table();
        assert_eq!(table.resolve("/login").unwrap().route.view, "LoginPage");
        assert_eq!(table.resolve("/").unwrap().route.view, "MainLayout");
        assert_eq!(
            table.resolve("/does/not/exist").unwrap().route.view,
            "ErrorNotFound"
        );
        assert!(table.has_catch_all());
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/users/:id", "UserPage"),
            RouteDescriptor::new("/users/me", "MePage"),
        ])
        .unwrap();
        assert_eq!(table.resolve("/users/me").unwrap().route.view, "UserPage");
    }

    #[test]
    fn test_query_fragment_and_trailing_slash_are_ignored() {
        let table = table();
        let matched = table.resolve("/login/?redirect=%2F#top").unwrap();
        assert_eq!(matched.route.view, "LoginPage");
        assert_eq!(matched.path, "/login/");
    }

    #[test]
    fn test_matching_ignores_case() {
        let table = table();
        assert_eq!(table.resolve("/LOGIN").unwrap().route.view, "LoginPage");
        assert_eq!(table.resolve("/Login/").unwrap().route.view, "LoginPage");

        let users = RouteTable::new(vec![RouteDescriptor::new("/users/:id", "UserPage")]).unwrap();
        let matched = users.resolve("/Users/AbC").unwrap();
        assert_eq!(matched.params.get("id").map(String::as_str), Some("AbC"));
    }

    #[test]
    fn test_missing_leading_slash_is_added() {
        assert_eq!(table().resolve("login").unwrap().route.view, "LoginPage");
    }

    #[test]
    fn test_named_param_captures_single_segment() {
        let table = RouteTable::new(vec![RouteDescriptor::new("/users/:id", "UserPage")]).unwrap();
        let matched = table.resolve("/users/42").unwrap();
        assert_eq!(matched.params.get("id").map(String::as_str), Some("42"));
        assert!(table.resolve("/users/42/edit").is_none());
        assert!(table.resolve("/users").is_none());
    }

    #[test]
    fn test_custom_regex_param() {
        let table =
            RouteTable::new(vec![RouteDescriptor::new(r"/orders/:id(\d+)", "OrderPage")]).unwrap();
        assert!(table.resolve("/orders/17").is_some());
        assert!(table.resolve("/orders/abc").is_none());
    }

    #[test]
    fn test_catch_all_captures_rest_of_path() {
        let matched_table = table();
        let matched = matched_table.resolve("/a/b/c").unwrap();
        assert_eq!(
            matched.params.get("catchAll").map(String::as_str),
            Some("a/b/c")
        );
    }

    #[test]
    fn test_optional_and_repeatable_modifiers() {
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/docs/:page?", "Docs"),
            RouteDescriptor::new("/files/:path+", "Files"),
        ])
        .unwrap();
        assert!(table.resolve("/docs").is_some());
        assert!(table.resolve("/docs/intro").is_some());
        assert!(table.resolve("/files").is_none());
        let matched = table.resolve("/files/a/b").unwrap();
        assert_eq!(matched.params.get("path").map(String::as_str), Some("a/b"));
    }

    #[test]
    fn test_table_without_catch_all_can_miss() {
        let table = RouteTable::new(vec![RouteDescriptor::new("/", "Home")]).unwrap();
        assert!(!table.has_catch_all());
        assert!(table.resolve("/missing").is_none());
    }

    #[test]
    fn test_invalid_patterns_are_rejected() {
        for pattern in ["/:", "/:id(", "/:id!", "/:id/:id", "/:id([)"] {
            let result = RouteTable::new(vec![RouteDescriptor::new(pattern, "X")]);
            let err = result.expect_err(pattern);
            assert!(err.is_config(), "{pattern}: {err}");
        }
    }

    #[test]
    fn test_meta_deserializes_camel_case() {
        let json = r#"{"path":"/","view":"MainLayout","meta":{"requiresAuth":true}}"#;
        let route: RouteDescriptor = serde_json::from_str(json).unwrap();
        assert!(route.meta.requires_auth);
        assert!(!route.meta.requires_guest);
    }
}

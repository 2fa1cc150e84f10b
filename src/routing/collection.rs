//! Ordered route registry and route builder.
//!
//! # Responsibilities
//! - Build validated routes from route options (`create`)
//! - Store routes in registration order (`add`)
//! - Look up the first route matching a request (`match_request`)
//!
//! # Design Decisions
//! - Linear scan in insertion order: first registered match wins, so a
//!   catch-all route must be added last
//! - No specificity ranking and no duplicate detection
//! - Options are validated in a fixed order (match, sub_protocols,
//!   controller) so the reported error is deterministic
//! - Read-only once serving starts; see `SharedRoutes` for replacement

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use serde_json::Value;

use crate::config::ServerParams;
use crate::controller::{ControllerRegistry, SharedController};
use crate::routing::error::{value_type, ConfigurationError};
use crate::routing::factory::{MatcherFactory, PatternMatcherFactory, MATCH_ALL};
use crate::routing::options::{ControllerOption, RouteOptions};
use crate::routing::route::Route;

/// Ordered collection of routes.
#[derive(Debug)]
pub struct RouteCollection {
    routes: Vec<Route>,
    server_params: ServerParams,
    matcher_factory: Arc<dyn MatcherFactory>,
    controllers: ControllerRegistry,
}

impl RouteCollection {
    /// Create an empty collection with server-wide defaults and the factory
    /// used to compile `match` patterns.
    pub fn new(server_params: ServerParams, matcher_factory: Arc<dyn MatcherFactory>) -> Self {
        Self {
            routes: Vec::new(),
            server_params,
            matcher_factory,
            controllers: ControllerRegistry::new(),
        }
    }

    /// Collection using the default pattern language.
    pub fn with_defaults(server_params: ServerParams) -> Self {
        Self::new(server_params, Arc::new(PatternMatcherFactory::new()))
    }

    /// Use `controllers` to resolve controller names in `create`.
    #[must_use]
    pub fn with_controllers(mut self, controllers: ControllerRegistry) -> Self {
        self.controllers = controllers;
        self
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn controllers(&self) -> &ControllerRegistry {
        &self.controllers
    }

    /// Append a route. Later routes only see requests earlier ones rejected.
    pub fn add(&mut self, route: Route) {
        tracing::debug!(
            pattern = %route.pattern(),
            position = self.routes.len(),
            "Route added"
        );
        self.routes.push(route);
    }

    /// The first route, in insertion order, that matches the request.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(req))
    }

    /// Build a route from `options` without adding it.
    pub fn create(&self, options: RouteOptions) -> Result<Route, ConfigurationError> {
        let RouteOptions {
            match_pattern,
            sub_protocols,
            controller,
        } = options;

        let pattern = match match_pattern {
            None | Some(Value::Null) => MATCH_ALL.to_string(),
            Some(Value::String(pattern)) => pattern,
            Some(other) => {
                return Err(ConfigurationError::InvalidMatchType {
                    found: value_type(&other),
                })
            }
        };
        let matcher = self
            .matcher_factory
            .create(&pattern)
            .map_err(ConfigurationError::InvalidMatch)?;

        let sub_protocols = self.resolve_sub_protocols(sub_protocols)?;
        let controller = self.resolve_controller(controller)?;

        tracing::debug!(
            pattern = %pattern,
            sub_protocols = ?sub_protocols,
            controller = ?controller,
            "Route created"
        );

        Ok(Route::new(pattern, matcher, controller, sub_protocols))
    }

    fn resolve_sub_protocols(&self, value: Option<Value>) -> Result<Vec<String>, ConfigurationError> {
        match value {
            None | Some(Value::Null) => Ok(self.server_params.sub_protocols.clone()),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(protocol) => Ok(protocol),
                    other => Err(ConfigurationError::InvalidSubProtocols {
                        found: value_type(&other),
                    }),
                })
                .collect(),
            Some(other) => Err(ConfigurationError::InvalidSubProtocols {
                found: value_type(&other),
            }),
        }
    }

    fn resolve_controller(
        &self,
        option: Option<ControllerOption>,
    ) -> Result<SharedController, ConfigurationError> {
        match option {
            None | Some(ControllerOption::Value(Value::Null)) => {
                Err(ConfigurationError::MissingController)
            }
            Some(ControllerOption::Value(Value::String(name))) => {
                self.controllers.instantiate(&name).map_err(|source| {
                    ConfigurationError::ControllerInstantiation { name, source }
                })
            }
            Some(ControllerOption::Value(other)) => Err(ConfigurationError::InvalidControllerType {
                found: value_type(&other),
            }),
            Some(ControllerOption::Handle(controller)) => Ok(controller),
            Some(ControllerOption::Opaque(value)) => {
                value
                    .into_controller()
                    .map_err(|rejected| ConfigurationError::NotAController {
                        type_name: rejected.type_name(),
                    })
            }
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in match order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ConnectionInfo, Controller, EchoController, Message};
    use crate::routing::error::PatternErrorReason;
    use serde_json::json;
    use std::error::Error as _;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::default()).unwrap()
    }

    fn collection() -> RouteCollection {
        RouteCollection::with_defaults(ServerParams {
            sub_protocols: vec!["default.v1".into()],
        })
        .with_controllers(ControllerRegistry::with_builtins())
    }

    fn echo() -> SharedController {
        Arc::new(EchoController)
    }

    #[derive(Debug)]
    struct Tagged(&'static str);

    impl Controller for Tagged {
        fn on_message(&self, _conn: &ConnectionInfo, _message: Message) -> Option<Message> {
            Some(Message::Text(self.0.to_string()))
        }
    }

    #[test]
    fn test_empty_collection_matches_nothing() {
        let routes = collection();
        assert!(routes.is_empty());
        assert!(routes.match_request(&request("/")).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut routes = collection();
        let chat = routes
            .create(RouteOptions::new().with_match("/chat").with_controller_name("echo"))
            .unwrap();
        let fallback = routes
            .create(RouteOptions::new().with_match("*").with_controller_name("discard"))
            .unwrap();
        routes.add(chat);
        routes.add(fallback);

        assert_eq!(routes.match_request(&request("/chat")).unwrap().pattern(), "/chat");
        assert_eq!(routes.match_request(&request("/other")).unwrap().pattern(), "*");
    }

    #[test]
    fn test_catch_all_first_shadows_later_routes() {
        let mut routes = collection();
        routes.add(routes.create(RouteOptions::new().with_controller(echo())).unwrap());
        routes.add(
            routes
                .create(RouteOptions::new().with_match("/chat").with_controller(echo()))
                .unwrap(),
        );

        assert_eq!(routes.len(), 2);
        assert_eq!(routes.match_request(&request("/chat")).unwrap().pattern(), "*");
    }

    #[test]
    fn test_overlapping_routes_resolve_by_order() {
        let mut routes = collection();
        let first: SharedController = Arc::new(Tagged("first"));
        let second: SharedController = Arc::new(Tagged("second"));
        routes.add(
            routes
                .create(RouteOptions::new().with_match("/a/*").with_controller(first.clone()))
                .unwrap(),
        );
        routes.add(
            routes
                .create(RouteOptions::new().with_match("/a/b").with_controller(second))
                .unwrap(),
        );

        let matched = routes.match_request(&request("/a/b")).unwrap();
        assert!(Arc::ptr_eq(matched.controller(), &first));
    }

    #[test]
    fn test_create_does_not_add() {
        let routes = collection();
        routes.create(RouteOptions::new().with_controller(echo())).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn test_match_defaults_to_match_all() {
        let routes = collection();
        let route = routes.create(RouteOptions::new().with_controller(echo())).unwrap();
        assert_eq!(route.pattern(), "*");
        assert!(route.matches(&request("/anything/at/all")));

        let route = routes
            .create(
                RouteOptions::new()
                    .with_match_value(Value::Null)
                    .with_controller(echo()),
            )
            .unwrap();
        assert!(route.matches(&request("/")));
    }

    #[test]
    fn test_invalid_pattern_is_wrapped() {
        let routes = collection();
        let err = routes
            .create(RouteOptions::new().with_match("/[oops").with_controller(echo()))
            .unwrap_err();

        assert!(err.to_string().starts_with("Invalid option \"match\": "));
        match err {
            ConfigurationError::InvalidMatch(ref cause) => {
                assert!(matches!(cause.reason(), PatternErrorReason::UnterminatedClass));
            }
            ref other => panic!("unexpected error: {other}"),
        }
        assert!(err.source().is_some());
    }

    #[test]
    fn test_non_string_match_is_rejected() {
        let routes = collection();
        let err = routes
            .create(
                RouteOptions::new()
                    .with_match_value(json!(42))
                    .with_controller(echo()),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidMatchType { found: "number" }));
    }

    #[test]
    fn test_null_sub_protocols_inherit_defaults() {
        let routes = collection();
        let route = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols_value(Value::Null)
                    .with_controller(echo()),
            )
            .unwrap();
        assert_eq!(route.sub_protocols(), ["default.v1"]);

        let route = routes.create(RouteOptions::new().with_controller(echo())).unwrap();
        assert_eq!(route.sub_protocols(), ["default.v1"]);
    }

    #[test]
    fn test_explicit_sub_protocols_replace_defaults() {
        let routes = collection();
        let route = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols(["x"])
                    .with_controller(echo()),
            )
            .unwrap();
        assert_eq!(route.sub_protocols(), ["x"]);

        let route = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols(Vec::<String>::new())
                    .with_controller(echo()),
            )
            .unwrap();
        assert!(route.sub_protocols().is_empty());
    }

    #[test]
    fn test_scalar_sub_protocols_are_rejected() {
        let routes = collection();
        let err = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols_value(json!("x"))
                    .with_controller(echo()),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSubProtocols { found: "string" }));

        let err = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols_value(json!(["x", 1]))
                    .with_controller(echo()),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSubProtocols { found: "number" }));
    }

    #[test]
    fn test_controller_by_name() {
        let routes = collection();
        let route = routes
            .create(RouteOptions::new().with_controller_name("echo"))
            .unwrap();
        let conn = ConnectionInfo {
            path: "/".into(),
            sub_protocol: None,
        };
        assert_eq!(
            route.controller().on_message(&conn, Message::Text("ping".into())),
            Some(Message::Text("ping".into()))
        );
    }

    #[test]
    fn test_unknown_controller_name() {
        let routes = collection();
        let err = routes
            .create(RouteOptions::new().with_controller_name("NonexistentType"))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::ControllerInstantiation { ref name, .. } if name == "NonexistentType"
        ));
        assert!(err.to_string().contains("NonexistentType"));
    }

    #[test]
    fn test_failing_controller_constructor() {
        let mut registry = ControllerRegistry::new();
        registry.register_fallible("flaky", || Err("out of sockets".into()));
        let routes = RouteCollection::with_defaults(ServerParams::default()).with_controllers(registry);

        let err = routes
            .create(RouteOptions::new().with_controller_name("flaky"))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to instantiate controller flaky: constructor failed: out of sockets"
        );
    }

    #[test]
    fn test_opaque_controller() {
        let routes = collection();
        let route = routes
            .create(RouteOptions::new().with_opaque_controller(echo()))
            .unwrap();
        assert!(route.matches(&request("/")));

        #[derive(Debug)]
        struct Widget;
        let err = routes
            .create(RouteOptions::new().with_opaque_controller(Widget))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::NotAController { .. }));
        let message = err.to_string();
        assert!(message.contains("Widget"));
        assert!(message.contains("does not implement Controller"));
    }

    #[test]
    fn test_wrong_type_controller() {
        let routes = collection();
        for (value, found) in [(json!(7), "number"), (json!(true), "boolean"), (json!(["echo"]), "array")] {
            let err = routes
                .create(RouteOptions::new().with_controller_value(value))
                .unwrap_err();
            assert!(
                matches!(err, ConfigurationError::InvalidControllerType { found: f } if f == found),
                "{err}"
            );
        }
    }

    #[test]
    fn test_missing_controller() {
        let routes = collection();
        let err = routes.create(RouteOptions::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingController));
        assert!(err.to_string().starts_with("Missing controller."));

        let err = routes
            .create(RouteOptions::new().with_controller_value(Value::Null))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingController));
    }

    #[test]
    fn test_validation_order() {
        let routes = collection();

        let err = routes
            .create(
                RouteOptions::new()
                    .with_match("")
                    .with_sub_protocols_value(json!("x"))
                    .with_controller_value(json!(1)),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidMatch(_)));

        let err = routes
            .create(
                RouteOptions::new()
                    .with_sub_protocols_value(json!("x"))
                    .with_controller_value(json!(1)),
            )
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSubProtocols { .. }));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut routes = collection();
        for pattern in ["/a", "/b", "/c"] {
            let route = routes
                .create(RouteOptions::new().with_match(pattern).with_controller(echo()))
                .unwrap();
            routes.add(route);
        }

        let patterns: Vec<&str> = routes.iter().map(Route::pattern).collect();
        assert_eq!(patterns, ["/a", "/b", "/c"]);
        assert_eq!((&routes).into_iter().count(), 3);
    }
}

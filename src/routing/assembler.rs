//! Router assembly
//!
//! Walks the registry's handler groups in declaration order, resolves each
//! through the container and binds every route, with its composed
//! interceptor chain, onto an axum router.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::Request,
    http::Method,
    response::{IntoResponse, Response},
    routing::{on, MethodFilter},
    Router,
};
use serde_json::Map;
use tracing::{debug, info};

use super::route::BoundHandler;
use crate::{
    container::{Container, ContainerError},
    middleware::{CallStyle, ChainOutcome, InterceptorChain, RequestParams},
    registry::ComponentRegistry,
};

/// Assembly errors; any of them aborts start-up
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("Route {method} {path} is declared more than once")]
    DuplicateRoute { method: Method, path: String },

    #[error("Route {method} {path} uses an unsupported method")]
    UnsupportedMethod { method: Method, path: String },

    #[error("Handler '{handler}' cannot be bound to handler group '{group}'")]
    HandlerMismatch {
        group: &'static str,
        handler: &'static str,
    },

    #[error("Handler group '{group}' could not be resolved: {source}")]
    Resolve {
        group: &'static str,
        #[source]
        source: ContainerError,
    },
}

/// One live route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub method: Method,
    pub path: String,
    pub group: &'static str,
    pub handler: &'static str,
    /// Interceptor names in execution order
    pub interceptors: Vec<&'static str>,
}

/// Result of assembly: the router and a description of what it serves
pub struct Assembly {
    pub router: Router,
    pub bindings: Vec<Binding>,
}

pub struct RouterAssembler<'a> {
    registry: &'a ComponentRegistry,
    container: &'a Container,
}

impl<'a> RouterAssembler<'a> {
    pub fn new(registry: &'a ComponentRegistry, container: &'a Container) -> Self {
        Self {
            registry,
            container,
        }
    }

    pub fn assemble(&self) -> Result<Assembly, AssemblyError> {
        let mut router = Router::new();
        let mut bindings = Vec::new();
        let mut seen = HashSet::new();

        for group in self.registry.handler_groups() {
            if group.routes.is_empty() {
                debug!(group = group.identity, "Handler group has no routes, skipping");
                continue;
            }

            let instance = group
                .resolve(self.container)
                .map_err(|source| AssemblyError::Resolve {
                    group: group.identity,
                    source,
                })?;

            for route in &group.routes {
                let path = join_path(group.base_path, route.path_suffix);

                if !seen.insert((route.method.clone(), path.clone())) {
                    return Err(AssemblyError::DuplicateRoute {
                        method: route.method.clone(),
                        path,
                    });
                }

                let filter = MethodFilter::try_from(route.method.clone()).map_err(|_| {
                    AssemblyError::UnsupportedMethod {
                        method: route.method.clone(),
                        path: path.clone(),
                    }
                })?;

                let handler = route.bind(Arc::clone(&instance)).ok_or(
                    AssemblyError::HandlerMismatch {
                        group: group.identity,
                        handler: route.handler_name,
                    },
                )?;

                let chain = group.interceptors.then(&route.interceptors);
                let style = CallStyle::from_method(&route.method);

                info!(
                    method = %route.method,
                    path = %path,
                    handler = route.handler_name,
                    interceptors = ?chain,
                    "Route bound"
                );

                let guards = Arc::new(group.interceptors.clone());
                let checks = Arc::new(route.interceptors.clone());

                bindings.push(Binding {
                    method: route.method.clone(),
                    path: path.clone(),
                    group: group.identity,
                    handler: route.handler_name,
                    interceptors: chain.names(),
                });

                router = router.route(
                    &path,
                    on(filter, move |request: Request| {
                        dispatch(
                            style,
                            Arc::clone(&guards),
                            Arc::clone(&checks),
                            Arc::clone(&handler),
                            request,
                        )
                    }),
                );
            }
        }

        Ok(Assembly { router, bindings })
    }
}

/// Per-request pipeline: collect parameters, run the group chain, then the
/// route chain, then the handler.
///
/// An unreadable query or body leaves the bag empty and is only reported
/// once the group chain has passed, so a guarded route never answers an
/// unauthenticated caller with anything but the guard's rejection.
async fn dispatch(
    style: CallStyle,
    guards: Arc<InterceptorChain>,
    checks: Arc<InterceptorChain>,
    handler: BoundHandler,
    request: Request,
) -> Response {
    let (mut params, unreadable) = match RequestParams::from_request(style, request).await {
        Ok(params) => (params, None),
        Err(e) => (RequestParams::new(style, Map::new(), Map::new()), Some(e)),
    };

    if let ChainOutcome::Terminated(rejection) = guards.run(&mut params) {
        return rejection.into_response();
    }

    if let Some(e) = unreadable {
        return e.into_response();
    }

    match checks.run(&mut params) {
        ChainOutcome::Dispatched => handler(params).await,
        ChainOutcome::Terminated(rejection) => rejection.into_response(),
    }
}

/// Join a base path and suffix with exactly one slash between segments
fn join_path(base: &str, suffix: &str) -> String {
    let mut path = String::from("/");

    for segment in base.split('/').chain(suffix.split('/')).filter(|s| !s.is_empty()) {
        if path.len() > 1 {
            path.push('/');
        }
        path.push_str(segment);
    }

    path
}

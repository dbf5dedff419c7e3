//! Handler groups and their route tables

use std::{any::Any, future::Future, sync::Arc};

use axum::{
    http::Method,
    response::{IntoResponse, Response},
};
use futures::future::{BoxFuture, FutureExt};

use crate::{
    container::{Container, ContainerResult, Token},
    middleware::{Interceptor, InterceptorChain, RequestParams},
};

/// A route handler bound to its resolved handler-group instance
pub type BoundHandler = Arc<dyn Fn(RequestParams) -> BoxFuture<'static, Response> + Send + Sync>;

type Instance = Arc<dyn Any + Send + Sync>;
type Resolver = Box<dyn Fn(&Container) -> ContainerResult<Instance> + Send + Sync>;
type Binder = Box<dyn Fn(Instance) -> Option<BoundHandler> + Send + Sync>;

/// One route of a handler group
pub struct RouteDefinition {
    pub method: Method,
    pub path_suffix: &'static str,
    pub handler_name: &'static str,
    /// Route-scope interceptors, run after the group's
    pub interceptors: InterceptorChain,
    bind: Binder,
}

impl RouteDefinition {
    /// Bind the handler to a group instance; `None` if the instance has the wrong type
    pub fn bind(&self, instance: Arc<dyn Any + Send + Sync>) -> Option<BoundHandler> {
        (self.bind)(instance)
    }
}

/// A handler group as declared to the registry
pub struct HandlerGroupDefinition {
    pub identity: &'static str,
    pub token: &'static str,
    pub base_path: &'static str,
    /// Group-scope interceptors, run before every route's own
    pub interceptors: InterceptorChain,
    pub routes: Vec<RouteDefinition>,
    resolve: Resolver,
}

impl HandlerGroupDefinition {
    /// Resolve the group's instance through the container
    pub fn resolve(&self, container: &Container) -> ContainerResult<Arc<dyn Any + Send + Sync>> {
        (self.resolve)(container)
    }
}

/// Typed builder for a [`HandlerGroupDefinition`].
///
/// Handlers take the resolved group instance, so their bodies see the
/// dependencies the container injected into it.
pub struct HandlerGroupBuilder<G> {
    token: Token<G>,
    base_path: &'static str,
    interceptors: InterceptorChain,
    routes: Vec<RouteDefinition>,
}

impl<G: Send + Sync + 'static> HandlerGroupBuilder<G> {
    pub fn new(token: Token<G>, base_path: &'static str) -> Self {
        Self {
            token,
            base_path,
            interceptors: InterceptorChain::new(),
            routes: Vec::new(),
        }
    }

    /// Add a group-scope interceptor
    pub fn intercept(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors = self.interceptors.with(interceptor);
        self
    }

    /// Declare a route
    pub fn route<H, Fut, R>(
        mut self,
        method: Method,
        path_suffix: &'static str,
        handler_name: &'static str,
        interceptors: InterceptorChain,
        handler: H,
    ) -> Self
    where
        H: Fn(Arc<G>, RequestParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let handler = Arc::new(handler);
        let bind: Binder = Box::new(move |instance| {
            let group = instance.downcast::<G>().ok()?;
            let handler = Arc::clone(&handler);

            let bound: BoundHandler = Arc::new(move |params| {
                let response = handler(Arc::clone(&group), params);
                async move { response.await.into_response() }.boxed()
            });
            Some(bound)
        });

        self.routes.push(RouteDefinition {
            method,
            path_suffix,
            handler_name,
            interceptors,
            bind,
        });
        self
    }

    pub fn get<H, Fut, R>(
        self,
        path_suffix: &'static str,
        handler_name: &'static str,
        interceptors: InterceptorChain,
        handler: H,
    ) -> Self
    where
        H: Fn(Arc<G>, RequestParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::GET, path_suffix, handler_name, interceptors, handler)
    }

    pub fn post<H, Fut, R>(
        self,
        path_suffix: &'static str,
        handler_name: &'static str,
        interceptors: InterceptorChain,
        handler: H,
    ) -> Self
    where
        H: Fn(Arc<G>, RequestParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::POST, path_suffix, handler_name, interceptors, handler)
    }

    pub fn build(self) -> HandlerGroupDefinition {
        let token = self.token;

        HandlerGroupDefinition {
            identity: std::any::type_name::<G>(),
            token: token.name(),
            base_path: self.base_path,
            interceptors: self.interceptors,
            routes: self.routes,
            resolve: Box::new(move |container| {
                container.resolve(&token).map(|group| group as Instance)
            }),
        }
    }
}

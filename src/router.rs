use std::{collections::HashMap, future::Future};

use futures::{future::BoxFuture, FutureExt};
use http::{Method, Response};
use lambda_http::Request;
use tracing::info;

pub type E = Box<dyn std::error::Error + Sync + Send + 'static>;

pub type HandlerResponse = Result<Response<String>, E>;

/// represents a functional fallback handler for unregistered methods.
pub type RequestHandler = fn(Request) -> HandlerResponse;
pub type BoxedHandler<'a> = Box<dyn Fn(Request) -> BoxFuture<'a, HandlerResponse> + Send + Sync + 'a>;

/// dispatches API Gateway proxy requests by HTTP method. The resource path is fixed by
/// the gateway integration, so only the verb selects the handler.
pub struct MethodRouter<'b> {
    handlers: HashMap<Method, BoxedHandler<'b>>,
    fallback: RequestHandler,
}

impl<'c> MethodRouter<'c> {
    pub fn new(fallback: RequestHandler) -> Self {
        MethodRouter {
            handlers: HashMap::new(),
            fallback,
        }
    }

    /// registers `handler` for `method`, replacing any earlier registration.
    pub fn insert<F, Fut>(&mut self, method: Method, handler: F) -> &mut Self
    where
        F: 'c + Send + Sync + (Fn(Request) -> Fut),
        Fut: 'c + Send + Future<Output = HandlerResponse>,
    {
        self.handlers
            .insert(method, Box::new(move |request| handler(request).boxed()));
        self
    }

    pub async fn handle(&self, request: Request) -> HandlerResponse {
        info!("method: {}, uri: {}", request.method(), request.uri());

        match self.handlers.get(request.method()) {
            Some(handler) => handler(request).await,
            None => (self.fallback)(request),
        }
    }
}

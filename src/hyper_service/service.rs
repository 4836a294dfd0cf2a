use super::handler::{BoxHandler, Handler};
use super::{BoxError, BoxFuture};
use crate::captures::Captures;
use crate::router::{Router, SharedRouter};

use std::future;
use std::sync::Arc;

use http::{Request, Response};
use hyper::service::Service;

/// `hyper` service resolving each request against a [`SharedRouter`].
///
/// Targets no route accepts go to the default handler. Automatic OPTIONS
/// and 405 responses are returned without invoking any handler.
pub struct RouterService<ReqBody, ResBody> {
    router: SharedRouter<BoxHandler<ReqBody, ResBody>>,
    default: BoxHandler<ReqBody, ResBody>,
}

impl<ReqBody, ResBody> Clone for RouterService<ReqBody, ResBody> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            default: Arc::clone(&self.default),
        }
    }
}

impl<ReqBody, ResBody> Service<Request<ReqBody>> for RouterService<ReqBody, ResBody>
where
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response<ResBody>, BoxError>>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        let router = self.router.load();
        let method = req.method().clone();

        let (handler, captures) = match router.dispatch(&method, req.uri().path()) {
            Some((dispatch, captures)) => match dispatch.handler() {
                Some(h) => (h, captures),
                None => {
                    let mut res = Response::new(ResBody::default());
                    dispatch.apply_to(&mut res);
                    return Box::pin(future::ready(Ok(res)));
                }
            },
            None => (&self.default, Captures::new()),
        };

        Handler::call(&**handler, req, captures)
    }
}

impl<ReqBody, ResBody> RouterService<ReqBody, ResBody>
where
    ReqBody: 'static,
    ResBody: 'static,
{
    pub fn new(
        router: impl Into<SharedRouter<BoxHandler<ReqBody, ResBody>>>,
        default: impl Handler<ReqBody, ResBody> + Send + Sync + 'static,
    ) -> Self {
        Self {
            router: router.into(),
            default: Arc::new(default),
        }
    }

    /// Handle for registering routes while the service is running.
    pub fn router(&self) -> &SharedRouter<BoxHandler<ReqBody, ResBody>> {
        &self.router
    }
}

impl<ReqBody, ResBody> Router<BoxHandler<ReqBody, ResBody>>
where
    ReqBody: 'static,
    ResBody: 'static,
{
    pub fn route(
        &mut self,
        methods: &str,
        target: &str,
        h: impl Handler<ReqBody, ResBody> + Send + Sync + 'static,
    ) -> &mut Self {
        self.insert(methods, target, Arc::new(h))
    }

    pub fn with_default(
        self,
        default: impl Handler<ReqBody, ResBody> + Send + Sync + 'static,
    ) -> RouterService<ReqBody, ResBody> {
        RouterService::new(self, default)
    }
}

macro_rules! define_method {
    ($name:tt, $method:literal) => {
        pub fn $name(
            &mut self,
            target: &str,
            h: impl Handler<ReqBody, ResBody> + Send + Sync + 'static,
        ) -> &mut Self {
            self.route($method, target, h)
        }
    };
}

impl<ReqBody, ResBody> Router<BoxHandler<ReqBody, ResBody>>
where
    ReqBody: 'static,
    ResBody: 'static,
{
    define_method!(get, "GET");
    define_method!(post, "POST");
    define_method!(put, "PUT");
    define_method!(delete, "DELETE");
    define_method!(patch, "PATCH");
    define_method!(head, "HEAD");
    define_method!(options, "OPTIONS");
}

use super::{BoxError, BoxFuture};
use crate::captures::Captures;

use std::error::Error as StdError;
use std::future::Future;
use std::sync::Arc;

use http::{Request, Response};

pub trait Handler<ReqBody, ResBody> {
    fn call(
        &self,
        req: Request<ReqBody>,
        captures: Captures,
    ) -> BoxFuture<'static, Result<Response<ResBody>, BoxError>>;
}

pub type BoxHandler<ReqBody, ResBody> = Arc<dyn Handler<ReqBody, ResBody> + Send + Sync>;

impl<F, E, Fut, ReqBody, ResBody> Handler<ReqBody, ResBody> for F
where
    F: Fn(Request<ReqBody>, Captures) -> Fut + 'static,
    ReqBody: 'static,
    ResBody: 'static,
    E: StdError + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<ResBody>, E>> + Send + 'static,
{
    fn call(
        &self,
        req: Request<ReqBody>,
        captures: Captures,
    ) -> BoxFuture<'static, Result<Response<ResBody>, BoxError>> {
        let fut = (self)(req, captures);
        Box::pin(async move {
            match fut.await {
                Ok(r) => Ok(r),
                Err(e) => Err(Box::new(e) as BoxError),
            }
        })
    }
}

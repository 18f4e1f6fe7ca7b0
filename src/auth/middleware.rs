use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::error::AppError;
use crate::state::AppState;

/// Response header carrying the replacement token when a protected request arrived
/// with an expired one.
pub const REFRESHED_TOKEN_HEADER: &str = "x-refreshed-token";

/// Resolves the bearer token of every request it wraps and stores the resulting
/// [`Session`](super::Session) in the request extensions.
///
/// Rejected requests are answered here with the error envelope rather than passed up
/// as errors, so outer middleware such as CORS still decorates the response.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err =
                    AppError::InternalServerError("Application state is not configured".into());
                return Ok(req.error_response(err).map_into_right_body());
            };

            let resolved = state.sessions.resolve(req.headers()).await;
            let session = match resolved {
                Ok(session) => session,
                Err(err) => return Ok(req.error_response(err).map_into_right_body()),
            };
            let renewed_token = session.renewed.then(|| session.token.clone());
            req.extensions_mut().insert(session);

            let mut res = service.call(req).await?.map_into_left_body();

            if let Some(token) = renewed_token {
                if let Ok(value) = HeaderValue::from_str(&token) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(REFRESHED_TOKEN_HEADER), value);
                }
            }

            Ok(res)
        })
    }
}

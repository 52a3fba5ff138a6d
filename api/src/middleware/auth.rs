//! JWT authentication middleware for protected endpoints.
//!
//! Extracts the bearer token from the Authorization header, runs it
//! through the token service (signature, expiry, kind, and revocation
//! checks), and injects an [`AuthContext`] into the request extensions.
//! Every rejection produces the same 401 body; the specific reason is
//! only logged.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use log::warn;
use uuid::Uuid;

use courier_core::domain::{Claims, TokenKind};
use courier_core::services::TokenService;

use crate::handlers::unauthorized_response;

/// Authenticated caller context injected into requests.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the token's subject claim
    pub user_id: Uuid,
    /// Username embedded in the token
    pub username: String,
    /// Token ID, used when the caller revokes this token
    pub jti: String,
    /// The raw bearer token as presented
    pub token: String,
}

impl AuthContext {
    fn from_claims(claims: Claims, token: String) -> Option<Self> {
        let user_id = claims.user_id().ok()?;
        Some(Self {
            user_id,
            username: claims.username,
            jti: claims.jti,
            token,
        })
    }
}

/// Middleware factory validating access tokens on every request.
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            // Rejections short-circuit with a rendered response rather
            // than an actix error, so the 401 body is the same one the
            // handlers produce.
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    warn!("Rejected request without a bearer token: {}", req.path());
                    return Ok(reject(req));
                }
            };

            let claims = match token_service.validate(&token, TokenKind::Access) {
                Ok(claims) => claims,
                Err(reason) => {
                    warn!("Rejected bearer token on {}: {}", req.path(), reason);
                    return Ok(reject(req));
                }
            };

            let context = match AuthContext::from_claims(claims, token) {
                Some(context) => context,
                None => {
                    warn!("Bearer token carries a non-UUID subject");
                    return Ok(reject(req));
                }
            };

            req.extensions_mut().insert(context);
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Renders the uniform 401 for a rejected request.
fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(unauthorized_response())
        .map_into_right_body()
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// The uniform 401 as an actix error, for the extractor path below.
fn unauthorized_error() -> Error {
    InternalError::from_response("unauthorized", unauthorized_response()).into()
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(unauthorized_error);
        ready(result)
    }
}

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::{config::AppConfig, services::auth_service, utils::error::AppError};

pub use crate::services::auth_service::Claims;

/// Valida o Bearer token e coloca `Claims` nas extensions do request.
/// Leituras e os endpoints de cadastro/login passam sem token.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

/// Rotas que não exigem token
pub fn is_public(method: &Method, path: &str) -> bool {
    let path = path.trim_end_matches('/');

    if method == Method::OPTIONS || method == Method::HEAD {
        return true;
    }

    if method == Method::GET {
        // verify/me leem o próprio token
        return !path.starts_with("/api/v1/auth");
    }

    method == Method::POST
        && matches!(
            path,
            "/api/v1/auth/login" | "/api/v1/auth/register" | "/api/v1/users"
        )
}

/// Extrai o token de `Authorization: Bearer <token>`
pub fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(req.method(), req.path()) {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let claims = match req.app_data::<web::Data<AppConfig>>() {
            Some(config) => match bearer_token(&req) {
                Some(token) => auth_service::verify_token(token, config),
                None => Err(AppError::unauthorized("Missing authorization token")),
            },
            None => Err(AppError::internal("AppConfig not registered")),
        };

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                // Responde aqui mesmo, sem chamar o handler
                let response = req.into_response(e.error_response()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

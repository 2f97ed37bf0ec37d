//! Admin guard middleware for Actix Web.
//!
//! Admin requests carry the admin API key, either in the `gbp_admin_token` header or as a bearer token in the
//! `Authorization` header. The guard compares the SHA-256 digest of the presented token with the digest of the
//! configured key, which it reads from the [`AdminKey`] in the app data.
//!
//! * No token: 401 Unauthorized.
//! * Wrong token, or no key configured: 403 Forbidden.
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web,
    Error,
};
use futures::future::LocalBoxFuture;
use gbp_common::Secret;
use log::{trace, warn};
use sha2::{Digest, Sha256};

use crate::errors::{AuthError, ServerError};

pub const ADMIN_TOKEN_HEADER: &str = "gbp_admin_token";

/// The digest of the configured admin API key. `None` means admin access is disabled.
#[derive(Clone, Default)]
pub struct AdminKey {
    digest: Option<[u8; 32]>,
}

impl AdminKey {
    pub fn new(key: &Secret<String>) -> Self {
        if key.is_empty() {
            return Self::default();
        }
        Self { digest: Some(token_digest(key.reveal().trim())) }
    }

    pub fn is_enabled(&self) -> bool {
        self.digest.is_some()
    }

    pub fn check(&self, token: Option<&str>) -> Result<(), AuthError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        let expected = self.digest.as_ref().ok_or(AuthError::AdminDisabled)?;
        if token_digest(token) == *expected {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Reads the admin token from the request headers.
pub fn admin_token(req: &ServiceRequest) -> Option<String> {
    if let Some(token) = req.headers().get(ADMIN_TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(token.to_string());
    }
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

#[derive(Default)]
pub struct AdminGuardFactory;

impl AdminGuardFactory {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminGuardFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = AdminGuardService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGuardService { service: Rc::new(service) }))
    }
}

pub struct AdminGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            trace!("🔐️ Checking admin token for {}", req.path());
            let key = req.app_data::<web::Data<AdminKey>>().map(|k| k.get_ref().clone()).unwrap_or_default();
            let token = admin_token(&req);
            match key.check(token.as_deref()) {
                Ok(()) => {
                    trace!("🔐️ Admin token for {} ✅️", req.path());
                    service.call(req).await
                },
                Err(e) => {
                    warn!("🔐️ Admin request to {} denied. {e}", req.path());
                    Err(ServerError::from(e).into())
                },
            }
        })
    }
}

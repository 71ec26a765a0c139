//! Form body extractor
//!
//! Decodes `application/x-www-form-urlencoded` bodies. Validation is left to
//! the handler so a failed form can be re-rendered with its messages.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Decoded form body
#[derive(Debug, Clone)]
pub struct HtmlForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for HtmlForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_form(e.body_text()))?;

        Ok(HtmlForm(value))
    }
}

//! Request extractors whose rejections render as [`ApiError`]

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body; a body that cannot be decoded is a `FormatError`
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string; values that cannot be decoded are a `FormatError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// Path parameters; a path that cannot be decoded names nothing, so it is a
/// `NotFoundError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParams<T>(pub T);

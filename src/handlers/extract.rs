//! Extractors whose rejections use the JSON error envelope

use axum::{
    extract::{FromRequest, FromRequestParts, Query},
    Json,
};

use crate::error::AppError;

/// `Json` body extractor rejecting with [`AppError`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Query` extractor rejecting with [`AppError`]
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

//! Extract the `?id=` query parameter used by single-row reads, updates and deletes.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Query-string key carrying the row id.
pub const ID_PARAM: &str = "id";

/// Optional `?id=`. Absent or empty is `None`; anything that is not an integer is `INVALID_ID`.
#[derive(Clone, Copy, Debug)]
pub struct OptionalId(pub Option<i64>);

/// Mandatory `?id=`; absent, empty or non-integer is `INVALID_ID`.
#[derive(Clone, Copy, Debug)]
pub struct RequiredId(pub i64);

async fn parse_id<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<Option<i64>, AppError> {
    let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map_err(|_| AppError::InvalidId)?;
    match params.get(ID_PARAM).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| AppError::InvalidId),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state).await.map(OptionalId)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequiredId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_id(parts, state).await?.map(RequiredId).ok_or(AppError::InvalidId)
    }
}

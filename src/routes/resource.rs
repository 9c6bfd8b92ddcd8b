use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::context::AppContext;
use crate::resource::Resource;

/// `GET /resource` - the store's fixed default resource.
pub async fn get_resource(State(ctx): State<Arc<AppContext>>) -> Json<Resource> {
    Json(ctx.store.default_resource())
}

/// `GET /echo/{value}` - echo the integer path segment back as a resource.
/// Non-integer segments are rejected by path extraction before this runs.
pub async fn echo(Path(value): Path<i64>) -> Json<Resource> {
    Json(Resource { value })
}

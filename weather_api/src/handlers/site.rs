use axum::{Json, extract::State};
use site_shell::SiteHead;
use std::sync::Arc;

use crate::structs::AppContext;

/// Head metadata for the single-page shell.
pub async fn handler(State(ctx): State<Arc<AppContext>>) -> Json<SiteHead> {
    Json(ctx.site_head.clone())
}

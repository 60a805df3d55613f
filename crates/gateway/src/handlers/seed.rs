//! Bulk-load handler

use axum::extract::State;

use crate::extract::Json;
use crate::AppState;
use venturedesk_common::{
    db::Repository,
    errors::Result,
    seed::{self, LoadReport},
};

/// Run the bulk loader against the configured seed document
pub async fn load_data(State(state): State<AppState>) -> Result<Json<LoadReport>> {
    let repo = Repository::new(state.db.clone());
    let path = std::path::Path::new(&state.config.seed.path);

    let report = seed::load_from_path(&repo, path).await?;

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped,
        total = report.total,
        "Seed document loaded"
    );

    Ok(Json(report))
}

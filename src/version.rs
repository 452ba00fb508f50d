use axum::{extract::State, response::Json};
use tracing::info;

use crate::config::Settings;
use crate::routes::AppState;
use crate::types::AppVersion;

/// Version reported when none is configured.
pub const DEFAULT_APP_VERSION: &str = "v0.0.1-rc";

/// Returns the trailing `v...` tag of a raw version string.
///
/// The tag is the leftmost suffix that starts with `v`, has at least one more
/// character and contains no `:`. `"2.3.1:v1.0.0"` yields `"v1.0.0"`. When
/// there is no such suffix the result is empty.
pub fn extract_app_version(raw: &str) -> &str {
    raw.char_indices()
        .filter(|&(_, c)| c == 'v')
        .map(|(i, _)| &raw[i..])
        .find(|tag| tag.len() > 1 && !tag[1..].contains(':'))
        .unwrap_or("")
}

pub fn app_version(settings: &Settings) -> AppVersion {
    let raw = settings.app_version.as_deref().unwrap_or(DEFAULT_APP_VERSION);
    let value = extract_app_version(raw);

    info!("Framework Version: {}", value);

    AppVersion {
        value: value.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/version",
    responses(
        (status = 200, description = "Application version", body = AppVersion)
    ),
    tag = "Version"
)]
pub async fn get_app_version(State(state): State<AppState>) -> Json<AppVersion> {
    Json(app_version(&state.settings))
}

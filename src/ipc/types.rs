use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    /// Worksheet drop folder; relative paths in mathOcr.solveFile resolve
    /// against it.
    pub workspace: Option<PathBuf>,
}

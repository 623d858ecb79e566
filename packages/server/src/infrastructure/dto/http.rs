//! HTTP API response DTOs.

use serde::Serialize;

/// Response of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    /// Currently admitted connections
    pub connections: usize,
    pub history: HistoryStatusDto,
    /// RFC 3339 start time of the server
    pub started_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryStatusDto {
    pub length: usize,
    pub capacity: usize,
}

use serde::Serialize;

use crate::analysis::fields::is_sentinel;

// TODO: replace with figures from a job-market data source once one is chosen.
const TREND_NOTE: &str = "Demand for this role has been steadily increasing over the past year. \
Key skills in demand are Python, Machine Learning, and Data Analysis.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleTrend {
    pub role: String,
    pub summary: String,
}

/// Placeholder market-trend note for a suggested role.
/// `None` when no real role was suggested.
pub fn role_trend(role: &str) -> Option<RoleTrend> {
    let role = role.trim();
    if role.is_empty() || is_sentinel(role) {
        return None;
    }
    Some(RoleTrend {
        role: role.to_string(),
        summary: TREND_NOTE.to_string(),
    })
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Readiness report for load balancers and the ops dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok`, `degraded` (reachable but schema not current) or `unavailable`.
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub reachable: bool,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration this build ships with.
    pub expected_schema_version: Option<i64>,
    pub pool_connections: u32,
    pub idle_connections: usize,
}

/// GET /health
///
/// Answers 200 only when the database is reachable and fully migrated,
/// otherwise 503 with the same body.
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let pool = &state.pool;
    let expected = sitedesk_db::expected_schema_version();

    let (reachable, applied) = match sitedesk_db::health_check(pool).await {
        Ok(()) => match sitedesk_db::applied_schema_version(pool).await {
            Ok(version) => (true, version),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read migration state");
                (true, None)
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable");
            (false, None)
        }
    };

    let status = schema_status(reachable, applied, expected);
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let report = HealthReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: DatabaseHealth {
            reachable,
            schema_version: applied,
            expected_schema_version: expected,
            pool_connections: pool.size(),
            idle_connections: pool.num_idle(),
        },
    };
    (code, Json(report))
}

fn schema_status(reachable: bool, applied: Option<i64>, expected: Option<i64>) -> &'static str {
    if !reachable {
        "unavailable"
    } else if applied.is_some() && applied >= expected {
        "ok"
    } else {
        "degraded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_schema_is_ok() {
        assert_eq!(schema_status(true, Some(3), Some(3)), "ok");
        // A newer database than this build still serves requests.
        assert_eq!(schema_status(true, Some(4), Some(3)), "ok");
    }

    #[test]
    fn pending_or_unknown_schema_is_degraded() {
        assert_eq!(schema_status(true, Some(2), Some(3)), "degraded");
        assert_eq!(schema_status(true, None, Some(3)), "degraded");
    }

    #[test]
    fn unreachable_database_is_unavailable() {
        assert_eq!(schema_status(false, Some(3), Some(3)), "unavailable");
    }
}

use std::time::Duration;

use shopfront_api::{ApiClient, HealthCheck, HealthReport, PoolStats};
use shopfront_core::AppConfig;

use crate::display::explain_api;

/// Prints the backend health report with latency and the cache guess.
///
/// Exits with an error when the backend reports itself unhealthy, so the
/// command can gate scripts.
pub(crate) async fn run_health(config: &AppConfig, api: &ApiClient) -> anyhow::Result<()> {
    let timed = api.health().await.map_err(explain_api)?;
    let threshold = Duration::from_millis(config.cache_hit_threshold_ms);

    println!("Backend:  {}", api.base_url());
    println!("Status:   {}", timed.value.status);
    println!(
        "Latency:  {} ms ({})",
        timed.elapsed.as_millis(),
        timed.cache_guess(threshold).label()
    );

    print_checks(&timed.value);

    let failing = timed.value.failing_checks();
    if !timed.value.is_healthy() {
        if failing.is_empty() {
            anyhow::bail!("backend reports status '{}'", timed.value.status);
        }
        anyhow::bail!("backend unhealthy: {}", failing.join(", "));
    }
    Ok(())
}

fn print_checks(report: &HealthReport) {
    if report.checks.is_empty() {
        return;
    }
    println!();
    println!("{:<16}{:<10}{:>12}{:>10}", "CHECK", "STATUS", "LATENCY", "POOL");
    for (name, check) in &report.checks {
        println!(
            "{:<16}{:<10}{:>12}{:>10}",
            name,
            check.status.as_deref().unwrap_or("-"),
            fmt_latency(check),
            fmt_pool(check)
        );
    }
}

fn fmt_latency(check: &HealthCheck) -> String {
    check
        .latency_ms
        .map_or_else(|| "-".to_string(), |ms| format!("{ms:.1} ms"))
}

fn fmt_pool(check: &HealthCheck) -> String {
    check
        .pool
        .as_ref()
        .and_then(PoolStats::utilization)
        .map_or_else(|| "-".to_string(), |pct| format!("{pct:.0}%"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn check(latency_ms: Option<f64>, pool: Option<PoolStats>) -> HealthCheck {
        HealthCheck {
            status: Some("ok".to_string()),
            latency_ms,
            pool,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn missing_values_show_placeholder() {
        let bare = check(None, None);
        assert_eq!(fmt_latency(&bare), "-");
        assert_eq!(fmt_pool(&bare), "-");
    }

    #[test]
    fn pool_usage_falls_back_to_counts() {
        let pool = PoolStats {
            size: Some(10),
            checked_out: Some(3),
            utilization_percent: None,
        };
        let with_pool = check(Some(2.5), Some(pool));
        assert_eq!(fmt_latency(&with_pool), "2.5 ms");
        assert_eq!(fmt_pool(&with_pool), "30%");
    }
}

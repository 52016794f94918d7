// system-tests/tests/helpers/readiness.rs
// ============================================================================
// Module: Server Readiness
// Description: Health polling for freshly spawned test servers.
// Purpose: Avoid racing requests against server startup.
// Dependencies: reqwest, system-tests, tokio
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use system_tests::config::readiness_timeout;

/// Polls `/health` until it answers 200 or the readiness budget runs out.
pub async fn wait_for_server_ready(base_url: &str) -> Result<(), String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .map_err(|err| err.to_string())?;
    let deadline = Instant::now() + readiness_timeout();
    let url = format!("{base_url}/health");
    loop {
        if let Ok(response) = client.get(&url).send().await
            && response.status().is_success()
        {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(format!("server at {base_url} did not become ready"));
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

// Demo mode: feed a stream of captured sessions into the host
//
// Sessions arrive over the same channel a real capture would use, spaced out
// so the Sessions tab fills up while you watch. A few carry preset aliases
// and one is a POST, so the disabled browser item can be seen.
//
// Run with: LAUNCHPAD_DEMO=1 cargo run --release

use crate::session::Session;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Send demo sessions until the list runs out or shutdown is signalled
pub async fn run_demo(tx: mpsc::Sender<Session>, mut shutdown_rx: oneshot::Receiver<()>) {
    // Let the TUI render first
    sleep(Duration::from_millis(800)).await;

    for (session, delay_ms) in generate_demo_sessions() {
        if shutdown_rx.try_recv().is_ok() {
            return;
        }
        if tx.send(session).await.is_err() {
            tracing::debug!("Demo feed closed by receiver");
            return;
        }
        sleep(Duration::from_millis(delay_ms)).await;
    }

    tracing::info!("Demo feed finished");
    // Hold the sender until shutdown
    let _ = shutdown_rx.await;
}

/// Sessions paired with the delay before the next one, in milliseconds
fn generate_demo_sessions() -> Vec<(Session, u64)> {
    let raw = vec![
        (json!({"id": 1, "url": "api.example.com/v1/users", "full_url": "https://api.example.com/v1/users", "method": "GET"}), 300),
        (json!({"id": 2, "url": "api.example.com/v1/users/42", "full_url": "https://api.example.com/v1/users/42", "method": "GET", "flags": {"launchpad.alias": "Alice"}}), 300),
        (json!({"id": 3, "url": "api.example.com/v1/orders", "full_url": "https://api.example.com/v1/orders", "method": "POST", "flags": {"x-process": "curl"}}), 400),
        (json!({"id": 4, "url": "cdn.example.com/app.js", "full_url": "https://cdn.example.com/app.js?v=7", "method": "GET"}), 250),
        (json!({"id": 5, "url": "auth.example.com/token", "full_url": "https://auth.example.com/token", "method": "POST", "flags": {"launchpad.alias": "Login"}}), 500),
        (json!({"id": 6, "url": "api.example.com/v1/orders/17", "full_url": "https://api.example.com/v1/orders/17", "method": "DELETE"}), 350),
        (json!({"id": 7, "url": "status.example.com/health", "full_url": "https://status.example.com/health", "method": "get"}), 300),
    ];

    raw.into_iter()
        .filter_map(|(value, delay)| match serde_json::from_value::<Session>(value) {
            Ok(session) => Some((session, delay)),
            Err(e) => {
                tracing::warn!("Skipping malformed demo session: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias;

    #[test]
    fn test_demo_sessions_are_well_formed() {
        let sessions = generate_demo_sessions();
        assert_eq!(sessions.len(), 7);
        assert!(sessions
            .iter()
            .any(|(s, _)| !s.request_method.eq_ignore_ascii_case("get")));
        let (aliased, _) = &sessions[1];
        assert_eq!(alias::alias(aliased).as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_run_demo_delivers_every_session() {
        let (tx, mut rx) = mpsc::channel(16);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_demo(tx, shutdown_rx));

        let mut ids = Vec::new();
        for _ in 0..7 {
            ids.push(rx.recv().await.unwrap().id);
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }
}

//! User-visible session actions: compose and open-in-browser

use crate::error::LaunchpadError;
use crate::host::HostActions;
use crate::session::Session;

/// Browsers can only replay GET requests
pub fn can_open_in_browser(session: &Session) -> bool {
    session.request_method.eq_ignore_ascii_case("get")
}

/// Launch the session's full URL with the default handler
pub fn open_in_browser(host: &mut dyn HostActions, session: &Session) -> Result<(), LaunchpadError> {
    if !can_open_in_browser(session) {
        return Err(LaunchpadError::NotGet {
            method: session.request_method.clone(),
            url: session.url.clone(),
        });
    }
    tracing::info!(id = session.id, url = %session.full_url, "Opening session in browser");
    host.launch(&session.full_url)?;
    Ok(())
}

/// Hand the session to the host's composer
pub fn send_to_compose(host: &mut dyn HostActions, session: &Session) -> Result<(), LaunchpadError> {
    tracing::info!(id = session.id, "Sending session to compose");
    host.compose(session)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every host call instead of performing it
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub composed: Vec<u64>,
        pub launched: Vec<String>,
    }

    impl HostActions for RecordingHost {
        fn compose(&mut self, session: &Session) -> anyhow::Result<()> {
            self.composed.push(session.id);
            Ok(())
        }

        fn launch(&mut self, url: &str) -> anyhow::Result<()> {
            self.launched.push(url.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    fn session(method: &str) -> Session {
        Session::new(4, "example.com/form", "https://example.com/form", method)
    }

    #[test]
    fn test_get_in_any_case_opens_full_url() {
        for method in ["GET", "get", "Get"] {
            let mut host = RecordingHost::default();
            open_in_browser(&mut host, &session(method)).unwrap();
            assert_eq!(host.launched, vec!["https://example.com/form"]);
        }
    }

    #[test]
    fn test_post_is_rejected_with_method_and_url() {
        let mut host = RecordingHost::default();
        let err = open_in_browser(&mut host, &session("post")).unwrap_err();

        assert!(matches!(&err, LaunchpadError::NotGet { method, url }
            if method == "post" && url == "example.com/form"));
        let message = err.to_string();
        assert!(message.contains("post"));
        assert!(message.contains("example.com/form"));
        assert!(host.launched.is_empty());
    }

    #[test]
    fn test_compose_forwards_session() {
        let mut host = RecordingHost::default();
        send_to_compose(&mut host, &session("POST")).unwrap();
        assert_eq!(host.composed, vec![4]);
    }

    #[test]
    fn test_host_failure_surfaces() {
        struct FailingHost;
        impl HostActions for FailingHost {
            fn compose(&mut self, _: &Session) -> anyhow::Result<()> {
                anyhow::bail!("composer unavailable")
            }
            fn launch(&mut self, _: &str) -> anyhow::Result<()> {
                anyhow::bail!("no browser")
            }
        }

        let err = open_in_browser(&mut FailingHost, &session("GET")).unwrap_err();
        assert!(matches!(err, LaunchpadError::Host(_)));
        assert_eq!(err.to_string(), "no browser");
    }
}

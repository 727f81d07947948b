// Terminal host actions
//
// The terminal has no real request composer, so "compose" queues the session
// and reports it. "Open in Browser" hands the URL to the OS default handler.

use crate::host::HostActions;
use crate::session::{Session, SessionId};
use anyhow::{Context, Result};
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct TerminalHost {
    compose_queue: Vec<SessionId>,
    notices: VecDeque<String>,
    /// Skip the real launcher (tests)
    dry_run: bool,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Sessions sent to compose, oldest first
    pub fn compose_queue(&self) -> &[SessionId] {
        &self.compose_queue
    }

    /// Next message for the user, if any
    pub fn take_notice(&mut self) -> Option<String> {
        self.notices.pop_front()
    }
}

impl HostActions for TerminalHost {
    fn compose(&mut self, session: &Session) -> Result<()> {
        self.compose_queue.push(session.id);
        tracing::info!(
            id = session.id,
            method = %session.request_method,
            url = %session.url,
            "Queued for compose"
        );
        self.notices.push_back(format!(
            "Compose: {} {}",
            session.request_method, session.url
        ));
        Ok(())
    }

    fn launch(&mut self, url: &str) -> Result<()> {
        if !self.dry_run {
            open::that(url).with_context(|| format!("failed to open {}", url))?;
        }
        self.notices.push_back(format!("Opened {}", url));
        Ok(())
    }
}

// Deferred work queue
//
// Some reactions must not happen inside the event handler that triggered
// them: restoring a session label after an edit commits, or restarting an
// edit the mutation guard cancelled. Handlers post a `Deferred` here, and the
// event loop drains the queue once the handler has returned. Tasks run in
// FIFO order; anything posted while draining runs in the same drain, after
// the tasks that were already waiting.

use crate::tree::NodeId;
use std::collections::VecDeque;

/// A continuation scheduled to run after the current event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Re-enter label edit mode on a node
    BeginEdit(NodeId),
    /// Replace a session node's text with its derived display label
    RestoreLabel(NodeId),
}

/// FIFO queue of deferred continuations
#[derive(Debug, Default)]
pub struct Dispatcher {
    queue: VecDeque<Deferred>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task to run after the current handler returns
    pub fn post(&mut self, task: Deferred) {
        tracing::trace!(?task, "Deferred task posted");
        self.queue.push_back(task);
    }

    /// Take the next task, oldest first
    pub fn next(&mut self) -> Option<Deferred> {
        self.queue.pop_front()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[cfg(test)]
    pub fn pending(&self) -> impl Iterator<Item = &Deferred> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeModel;

    #[test]
    fn test_fifo_order() {
        let mut tree = TreeModel::new();
        let a = tree.create_group(None, "a").unwrap();
        let b = tree.create_group(None, "b").unwrap();

        let mut dispatcher = Dispatcher::new();
        dispatcher.post(Deferred::RestoreLabel(a));
        dispatcher.post(Deferred::BeginEdit(b));
        assert_eq!(dispatcher.len(), 2);

        assert_eq!(dispatcher.next(), Some(Deferred::RestoreLabel(a)));
        dispatcher.post(Deferred::RestoreLabel(b));
        assert_eq!(dispatcher.next(), Some(Deferred::BeginEdit(b)));
        assert_eq!(dispatcher.next(), Some(Deferred::RestoreLabel(b)));
        assert_eq!(dispatcher.next(), None);
        assert!(dispatcher.is_empty());
    }
}

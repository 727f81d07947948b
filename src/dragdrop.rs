//! Drag and drop of sessions into groups
//!
//! # States
//!
//! ```text
//! Idle ──begin──▶ Dragging ──over──▶ OverValid / OverInvalid ──drop──▶ Dropped
//!                     │                        │
//!                     └─────────cancel─────────┴──────────────────────▶ Cancelled
//! ```
//!
//! Drops always copy: the same session may live in many groups, but never
//! twice under the same group.

use crate::alias;
use crate::session::Session;
use crate::tree::{NodeId, NodeKind, TreeModel};
use std::ops::BitOr;
use std::path::PathBuf;
use std::sync::Arc;

/// Format tag for a drag payload carrying sessions
pub const SESSION_ARRAY_FORMAT: &str = "Launchpad.Session[]";

/// Format tag for a drag payload carrying file paths
pub const FILE_DROP_FORMAT: &str = "FileDrop";

/// Format tag for plain text payloads
pub const TEXT_FORMAT: &str = "Text";

/// Set of drag effects, as a bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragEffects(u8);

impl DragEffects {
    pub const NONE: Self = Self(0);
    pub const COPY: Self = Self(1);
    pub const MOVE: Self = Self(1 << 1);
    pub const SCROLL: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for DragEffects {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// What is being dragged
#[derive(Debug, Clone)]
pub enum DragData {
    Sessions(Vec<Arc<Session>>),
    Files(Vec<PathBuf>),
    Text(String),
}

impl DragData {
    /// Classify text pasted into the terminal
    ///
    /// Dropping files on a terminal window pastes their paths, one per line.
    /// When every non-blank line names an existing path the paste is a file
    /// drop, otherwise it is plain text.
    pub fn from_pasted(text: &str) -> Self {
        let paths: Vec<PathBuf> = text
            .lines()
            .map(|line| line.trim().trim_matches(|c| c == '\'' || c == '"'))
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        if !paths.is_empty() && paths.iter().all(|path| path.exists()) {
            DragData::Files(paths)
        } else {
            DragData::Text(text.to_string())
        }
    }

    pub fn format(&self) -> &'static str {
        match self {
            DragData::Sessions(_) => SESSION_ARRAY_FORMAT,
            DragData::Files(_) => FILE_DROP_FORMAT,
            DragData::Text(_) => TEXT_FORMAT,
        }
    }

    pub fn has_format(&self, format: &str) -> bool {
        self.format() == format
    }

    /// The session array, if this payload carries one
    pub fn sessions(&self) -> Option<&[Arc<Session>]> {
        match self {
            DragData::Sessions(sessions) => Some(sessions),
            _ => None,
        }
    }
}

/// Where a drag currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
    OverValid(NodeId),
    OverInvalid(NodeId),
    Dropped,
    Cancelled,
}

/// Outcome of a drop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropReport {
    /// New session nodes, in the order they were appended
    pub added: Vec<NodeId>,
    /// Sessions rejected as already present under the target
    pub skipped: usize,
}

/// Effect a drop on `target` would have
///
/// Only groups accept drops, and only payloads that advertise sessions or files.
pub fn effect_for(tree: &TreeModel, target: NodeId, data: &DragData) -> DragEffects {
    let accepts_format =
        data.has_format(SESSION_ARRAY_FORMAT) || data.has_format(FILE_DROP_FORMAT);
    if tree.kind(target) == NodeKind::InnerNode && accepts_format {
        DragEffects::COPY
    } else {
        DragEffects::NONE
    }
}

/// Merge sessions into `target`, skipping ids already among its session children
///
/// Group children never block a session. The check runs against the live
/// child list, so repeats inside `sessions` collapse as well.
pub fn merge_sessions(tree: &mut TreeModel, target: NodeId, sessions: &[Arc<Session>]) -> DropReport {
    let mut report = DropReport::default();
    if tree.kind(target) != NodeKind::InnerNode {
        return report;
    }

    for session in sessions {
        if already_present(tree, target, session) {
            report.skipped += 1;
            continue;
        }
        match tree.add_session(target, session, alias::display_label(session)) {
            Ok(node) => report.added.push(node),
            Err(e) => tracing::warn!(error = %e, "Could not add dropped session"),
        }
    }

    if !report.added.is_empty() {
        tree.expand(target);
    }
    report
}

fn already_present(tree: &TreeModel, target: NodeId, session: &Session) -> bool {
    tree.children(target)
        .iter()
        .filter_map(|&child| tree.session(child))
        .any(|existing| existing.id == session.id)
}

/// Tracks one drag gesture at a time
#[derive(Debug, Default)]
pub struct DragDropController {
    state: DragState,
    data: Option<DragData>,
    allowed: DragEffects,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    #[cfg(test)]
    pub fn data(&self) -> Option<&DragData> {
        self.data.as_ref()
    }

    #[cfg(test)]
    pub fn allowed_effects(&self) -> DragEffects {
        self.allowed
    }

    /// A drag is in flight (not yet dropped or cancelled)
    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            DragState::Dragging | DragState::OverValid(_) | DragState::OverInvalid(_)
        )
    }

    /// Start dragging an arbitrary payload
    pub fn begin(&mut self, data: DragData, allowed: DragEffects) {
        tracing::debug!(format = data.format(), "Drag started");
        self.data = Some(data);
        self.allowed = allowed;
        self.state = DragState::Dragging;
    }

    /// Start dragging every session under `node`
    ///
    /// A session node drags itself. Returns how many sessions are carried.
    pub fn begin_from_node(&mut self, tree: &TreeModel, node: NodeId) -> usize {
        let sessions = tree.collect_sessions(node);
        let count = sessions.len();
        self.begin(
            DragData::Sessions(sessions),
            DragEffects::COPY | DragEffects::MOVE | DragEffects::SCROLL,
        );
        count
    }

    /// Pointer moved over `target`
    ///
    /// An effect the drag source did not allow is reported as none.
    /// Returns the effect to show, or `None` when there is nothing under the
    /// pointer (or no drag), in which case the state is left alone.
    pub fn drag_over(&mut self, tree: &TreeModel, target: Option<NodeId>) -> Option<DragEffects> {
        if !self.is_dragging() {
            return None;
        }
        let target = target?;
        let data = self.data.as_ref()?;

        let effect = effect_for(tree, target, data);
        let effect = if self.allowed.contains(effect) {
            effect
        } else {
            DragEffects::NONE
        };
        self.state = if effect.is_none() {
            DragState::OverInvalid(target)
        } else {
            DragState::OverValid(target)
        };
        Some(effect)
    }

    /// Release over `target`
    ///
    /// Payloads without sessions, empty arrays and missing targets are ignored.
    pub fn drop_on(&mut self, tree: &mut TreeModel, target: Option<NodeId>) -> DropReport {
        if !self.is_dragging() {
            return DropReport::default();
        }
        self.state = DragState::Dropped;
        let data = self.data.take();

        let Some(sessions) = data.as_ref().and_then(DragData::sessions) else {
            tracing::debug!("Drop ignored: payload carries no sessions");
            return DropReport::default();
        };
        if sessions.is_empty() {
            return DropReport::default();
        }
        let Some(target) = target else {
            return DropReport::default();
        };

        let report = merge_sessions(tree, target, sessions);
        tracing::info!(
            target = %target,
            added = report.added.len(),
            skipped = report.skipped,
            "Sessions dropped"
        );
        report
    }

    /// Abandon the drag; the tree is untouched
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag cancelled");
            self.state = DragState::Cancelled;
        }
        self.data = None;
    }
}

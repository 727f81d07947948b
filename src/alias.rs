//! Session aliases and display labels
//!
//! The alias lives in the session's own flag map under [`ALIAS_KEY`], not in
//! the tree, so every node that points at the same session shows the same name.

use crate::session::Session;

/// Flag key reserved for the user-assigned alias
pub const ALIAS_KEY: &str = "launchpad.alias";

/// Separates alias and URL in display labels; never allowed inside an alias
const ALIAS_DELIMITER: &str = "-";

/// Store a user-entered alias
///
/// `None` leaves any existing alias untouched. Otherwise every delimiter is
/// stripped and surrounding whitespace trimmed before the value is written.
pub fn set_alias(session: &Session, label: Option<&str>) {
    let Some(label) = label else {
        return;
    };
    let alias = label.replace(ALIAS_DELIMITER, "");
    session.set_flag(ALIAS_KEY, alias.trim());
}

/// The raw alias, if one was ever set
pub fn alias(session: &Session) -> Option<String> {
    session.flag(ALIAS_KEY)
}

/// Human-readable label: `"{alias} - {url}"`, or just the URL without an alias
pub fn display_label(session: &Session) -> String {
    match alias(session) {
        Some(alias) => format!("{} {} {}", alias, ALIAS_DELIMITER, session.url),
        None => session.url.clone(),
    }
}

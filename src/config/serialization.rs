//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// A string as a TOML value, quoted and escaped
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let sessions_file = match &self.sessions_file {
            Some(path) => format!("sessions_file = {}", quoted(&path.display().to_string())),
            None => "# sessions_file = \"~/captures/sessions.jsonl\"".to_string(),
        };

        format!(
            r#"# launchpad configuration

# Group the tree starts with
root_group = {root}

# Label for groups created with "Add node group"
new_group_label = {new_group}

# Captured sessions to load at startup (JSON lines, LAUNCHPAD_SESSIONS overrides)
{sessions_file}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}  # trace, debug, info, warn, error, off
# JSON file logging (in addition to the TUI log strip)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            root = quoted(&self.root_group),
            new_group = quoted(&self.new_group_label),
            log_level = quoted(&self.logging.level_name()),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}

// Components module - reusable UI building blocks
//
// Shell components are rendered on every tab:
// - Title bar: tab strip with icons
// - Logs panel: recent system log entries
// - Status bar: key hints, drag state, compose queue, uptime
//
// Tab content:
// - Sessions panel: the host's captured sessions (drag source)
// - Tree panel: the Launchpad group tree

pub mod logs_panel;
pub mod sessions_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;
pub mod tree_panel;

pub use toast::Toast;

//! Command handlers

mod activate;
mod clean;
mod context;
mod environments;
mod fetch;
mod install;
mod list;
mod project_root;

pub use activate::cmd_activate;
pub use clean::cmd_clean;
pub use context::ProjectContext;
pub use environments::cmd_environments;
pub use fetch::cmd_fetch;
pub use install::cmd_install;
pub use list::cmd_list;

//! Sandbox directory layout and locking

mod layout;
mod lock;

pub use layout::{
    SandboxLayout, CACHE_DIR, ENVIRONMENTS_DIR, GEMS_DIR, INSTALL_INDEX_FILE, LOADER_SHIM_FILE,
    LOCK_FILE, SPECIFICATIONS_DIR,
};
pub use lock::SandboxLock;

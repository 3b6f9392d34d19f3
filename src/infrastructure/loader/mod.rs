//! Package loaders available outside the sandbox

mod ambient;

pub use ambient::AmbientLoader;

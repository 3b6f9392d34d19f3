//! Common test utilities for bundlebox CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project, package repository and home directories
//! - Fixtures: Reusable manifest snippets and package builders

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;

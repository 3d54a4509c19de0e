//! Core types for the UIDL component generators.
//!
//! This crate provides the types shared by the pipeline and the generators:
//! - The UIDL tree (components, nodes, props, dependencies)
//! - The `$props.` dynamic binding convention
//! - Error types

pub mod binding;
pub mod errors;
pub mod uidl;

pub use binding::*;
pub use errors::*;
pub use uidl::*;

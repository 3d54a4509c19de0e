//! React and Vue component generation from UIDL.
//!
//! This crate plugs concrete tree builders into the `uidl-pipeline`
//! assembly line and packages them as ready-made generators:
//!
//! - React: a function component with JSX, `propTypes`/`defaultProps`,
//!   and either inline styles or a scoped `<style jsx>` block
//! - Vue: a single-file component with a `<template>` and a `<script>`
//!
//! # Example
//!
//! ```ignore
//! use uidl_codegen::{generate_vue_component, parse_mapping, parse_uidl};
//!
//! let uidl = parse_uidl(&std::fs::read_to_string("card.json")?)?;
//! let mapping = parse_mapping(r#"{ "container": { "name": "div" } }"#)?;
//! let output = futures::executor::block_on(generate_vue_component(uidl, mapping))?;
//! println!("{}", output.single_file());
//! ```

pub mod error;
pub mod generators;
pub mod js;
pub mod plugins;
pub mod props;
pub mod react;
pub mod vue;

pub use error::{CodegenError, Result};
pub use generators::{
    generate_react_component, generate_vue_component, ComponentGenerator, GeneratedComponent,
    ReactGenerator, ReactGeneratorConfig, StyleVariation, VueGenerator,
};
pub use plugins::{
    ImportStatementsConfig, ImportStatementsPlugin, ReactComponentConfig, ReactComponentPlugin,
    ReactInlineStylesPlugin, ReactJssConfig, ReactJssPlugin, ReactStyledJsxPlugin,
    ReactStylesConfig, VueComponentConfig, VueComponentPlugin,
};

use uidl_core::ComponentUidl;
use uidl_pipeline::MappingResolver;

/// Read a component from its JSON UIDL.
pub fn parse_uidl(json: &str) -> Result<ComponentUidl> {
    Ok(serde_json::from_str(json)?)
}

/// Read an element mapping table (`type -> { name, attrs, dependency }`).
pub fn parse_mapping(json: &str) -> Result<MappingResolver> {
    Ok(serde_json::from_str(json)?)
}

//! Plugins the generators assemble.

mod import_statements;
mod react_component;
mod react_inline_styles;
mod react_jss;
mod react_styled_jsx;
mod vue_component;

pub use import_statements::{ImportStatementsConfig, ImportStatementsPlugin};
pub use react_component::{
    component_identifier, ReactComponentConfig, ReactComponentPlugin, PROP_TYPES_IMPORT,
};
pub use react_inline_styles::{ReactInlineStylesPlugin, ReactStylesConfig};
pub use react_jss::{ReactJssConfig, ReactJssPlugin, INJECT_SHEET_IMPORT};
pub use react_styled_jsx::ReactStyledJsxPlugin;
pub use vue_component::{wrap_script, wrap_template, VueComponentConfig, VueComponentPlugin};

use convert_case::{Case, Casing};
use uidl_core::{ComponentUidl, PipelineError, Style};
use uidl_pipeline::{NodePath, PipelineStructure};

use crate::js::{Expression, ObjectExpression};
use crate::react::ReactComponent;

/// The React component held by the chunk `name`.
pub(crate) fn react_component_mut<'a>(
    structure: &'a mut PipelineStructure,
    name: &str,
) -> Result<&'a mut ReactComponent, PipelineError> {
    structure
        .require_chunk_mut(name)?
        .content_as_mut::<ReactComponent>()
        .ok_or_else(|| PipelineError::UnexpectedContent {
            name: name.to_string(),
            expected: "React component",
        })
}

/// Named nodes carrying styles, paired with their path in the chunk `name`.
///
/// Nodes missing from the chunk lookup are skipped.
pub(crate) fn styled_nodes(
    structure: &PipelineStructure,
    name: &str,
) -> Result<Vec<(String, NodePath, Style)>, PipelineError> {
    let chunk = structure.chunk(name).ok_or_else(|| PipelineError::MissingChunk {
        name: name.to_string(),
    })?;
    Ok(collect_styles(&structure.uidl)
        .into_iter()
        .filter_map(|(node_name, style)| {
            let path = chunk.meta.lookup.get(&node_name)?.clone();
            Some((node_name, path, style))
        })
        .collect())
}

fn collect_styles(uidl: &ComponentUidl) -> Vec<(String, Style)> {
    uidl.content
        .descendants()
        .filter(|node| !node.name.is_empty() && !node.style.is_empty())
        .map(|node| (node.name.clone(), node.style.clone()))
        .collect()
}

/// A style map as an object literal with camelCase keys.
///
/// `$props.<name>` values are rendered through `dynamic`.
pub(crate) fn style_object(style: &Style, dynamic: impl Fn(&str) -> Expression) -> ObjectExpression {
    let mut object = ObjectExpression::new();
    for (property, value) in style {
        let value = match value.prop_reference() {
            Some(prop) => dynamic(prop),
            None => Expression::literal(value),
        };
        object.push(property.to_case(Case::Camel), value);
    }
    object
}

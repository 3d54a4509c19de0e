//! The `<script>` declaration block of a template component.

use crate::js::{Expression, ImportDeclaration, JsProgram, ObjectExpression, Statement};

/// `export default { name: "<name>", props: {} }`
pub fn empty_vue_export(name: &str) -> ObjectExpression {
    ObjectExpression::new()
        .with_property("name", Expression::string(name))
        .with_property("props", Expression::Object(ObjectExpression::new()))
}

/// Script skeleton: imports, then the default export.
///
/// When `component_declarations` is not empty the export also lists them
/// under `components`.
pub fn empty_vue_component_script(
    name: &str,
    imports: Vec<ImportDeclaration>,
    component_declarations: &[String],
) -> JsProgram {
    let mut export = empty_vue_export(name);

    if !component_declarations.is_empty() {
        let mut components = ObjectExpression::new();
        for declaration in component_declarations {
            components.push_shorthand(declaration.clone());
        }
        export.push("components", Expression::Object(components));
    }

    let mut program = JsProgram::new();
    program.body.extend(imports.into_iter().map(Statement::Import));
    program.push(Statement::ExportDefault(Expression::Object(export)));
    program
}

/// The `props` object of the default export.
pub fn props_object_mut(program: &mut JsProgram) -> Option<&mut ObjectExpression> {
    match program.default_export_object_mut()?.get_mut("props")? {
        Expression::Object(props) => Some(props),
        _ => None,
    }
}

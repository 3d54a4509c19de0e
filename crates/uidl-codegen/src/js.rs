//! A small JavaScript syntax tree for declaration sections.
//!
//! Only what the generators emit is modelled: imports, `export default`,
//! assignments, and literal/object/member expressions.

use uidl_core::{format_number, AttrValue, DependencyDescriptor};
use uidl_pipeline::SourceTree;

const INDENT: &str = "  ";

/// A JavaScript expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    StringLiteral(String),
    NumericLiteral(f64),
    BooleanLiteral(bool),
    Null,
    /// `object.property`
    Member {
        object: Box<Expression>,
        property: String,
    },
    Object(ObjectExpression),
    Template(TemplateLiteral),
    /// `callee(arg, ...)`
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// `(param, ...) => body`
    Arrow {
        params: Vec<String>,
        body: Box<Expression>,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(value.into())
    }

    /// `object.property` where `object` is an identifier.
    pub fn member(object: impl Into<String>, property: impl Into<String>) -> Self {
        Expression::Member {
            object: Box::new(Expression::Identifier(object.into())),
            property: property.into(),
        }
    }

    /// `object.a.b` for a dotted `path`.
    pub fn member_path(object: impl Into<String>, path: &[&str]) -> Self {
        path.iter().fold(Expression::Identifier(object.into()), |object, property| {
            Expression::Member {
                object: Box::new(object),
                property: property.to_string(),
            }
        })
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// `(param) => body`
    pub fn arrow(param: impl Into<String>, body: Expression) -> Self {
        Expression::Arrow {
            params: vec![param.into()],
            body: Box::new(body),
        }
    }

    /// The literal expression for a UIDL value.
    pub fn literal(value: &AttrValue) -> Self {
        match value {
            AttrValue::String(s) => Expression::StringLiteral(s.clone()),
            AttrValue::Number(n) => Expression::NumericLiteral(*n),
            AttrValue::Boolean(b) => Expression::BooleanLiteral(*b),
        }
    }

    /// Print the expression. Objects span several lines at `indent`; `None`
    /// keeps them on one line.
    pub fn write(&self, out: &mut String, indent: Option<usize>) {
        match self {
            Expression::Identifier(name) => out.push_str(name),
            Expression::StringLiteral(value) => write_string_literal(out, value),
            Expression::NumericLiteral(n) => out.push_str(&format_number(*n)),
            Expression::BooleanLiteral(b) => out.push_str(if *b { "true" } else { "false" }),
            Expression::Null => out.push_str("null"),
            Expression::Member { object, property } => {
                object.write(out, indent);
                out.push('.');
                out.push_str(property);
            }
            Expression::Object(object) => object.write(out, indent),
            Expression::Template(template) => template.write(out),
            Expression::Call { callee, arguments } => {
                callee.write(out, indent);
                out.push('(');
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    argument.write(out, indent);
                }
                out.push(')');
            }
            Expression::Arrow { params, body } => {
                out.push('(');
                out.push_str(&params.join(", "));
                out.push_str(") => ");
                body.write(out, indent);
            }
        }
    }

    pub fn to_code(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, Some(0));
        out
    }

    /// Print on a single line.
    pub fn to_inline_code(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, None);
        out
    }
}

/// `{ key: value, ... }`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectExpression {
    pub properties: Vec<ObjectProperty>,
}

impl ObjectExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Expression) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: Expression) {
        self.properties.push(ObjectProperty {
            key: key.into(),
            value,
            shorthand: false,
        });
    }

    /// Add `{ name }`.
    pub fn push_shorthand(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.properties.push(ObjectProperty {
            value: Expression::Identifier(name.clone()),
            key: name,
            shorthand: true,
        });
    }

    pub fn get(&self, key: &str) -> Option<&Expression> {
        self.properties.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Expression> {
        self.properties
            .iter_mut()
            .find(|p| p.key == key)
            .map(|p| &mut p.value)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn write(&self, out: &mut String, indent: Option<usize>) {
        if self.properties.is_empty() {
            out.push_str("{}");
            return;
        }

        match indent {
            None => {
                out.push_str("{ ");
                for (i, property) in self.properties.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    property.write(out, None);
                }
                out.push_str(" }");
            }
            Some(level) => {
                out.push_str("{\n");
                for (i, property) in self.properties.iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                    }
                    out.push_str(&INDENT.repeat(level + 1));
                    property.write(out, Some(level + 1));
                }
                out.push('\n');
                out.push_str(&INDENT.repeat(level));
                out.push('}');
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub key: String,
    pub value: Expression,
    pub shorthand: bool,
}

impl ObjectProperty {
    fn write(&self, out: &mut String, indent: Option<usize>) {
        if self.shorthand {
            out.push_str(&self.key);
            return;
        }
        if is_identifier(&self.key) {
            out.push_str(&self.key);
        } else {
            write_string_literal(out, &self.key);
        }
        out.push_str(": ");
        self.value.write(out, indent);
    }
}

/// A template literal without substitutions; `raw` is printed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub raw: String,
}

impl TemplateLiteral {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    fn write(&self, out: &mut String) {
        out.push('`');
        out.push_str(&self.raw);
        out.push('`');
    }
}

/// `import Local from 'source'` or `import { Local } from 'source'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub local: String,
    pub source: String,
    pub named: bool,
}

impl ImportDeclaration {
    pub fn default_import(local: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            source: source.into(),
            named: false,
        }
    }

    /// The import statement for a registered dependency.
    pub fn for_dependency(key: &str, dependency: &DependencyDescriptor) -> Self {
        Self {
            local: key.to_string(),
            source: dependency.meta.path.clone(),
            named: dependency.meta.named_import,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Import(ImportDeclaration),
    ExportDefault(Expression),
    /// `target = value`
    Assign { target: Expression, value: Expression },
    /// `const name = value`
    Const { name: String, value: Expression },
}

impl Statement {
    fn write(&self, out: &mut String) {
        match self {
            Statement::Import(import) => {
                out.push_str("import ");
                if import.named {
                    out.push_str("{ ");
                    out.push_str(&import.local);
                    out.push_str(" }");
                } else {
                    out.push_str(&import.local);
                }
                out.push_str(" from '");
                out.push_str(&import.source);
                out.push('\'');
            }
            Statement::ExportDefault(expression) => {
                out.push_str("export default ");
                expression.write(out, Some(0));
            }
            Statement::Assign { target, value } => {
                target.write(out, Some(0));
                out.push_str(" = ");
                value.write(out, Some(0));
            }
            Statement::Const { name, value } => {
                out.push_str("const ");
                out.push_str(name);
                out.push_str(" = ");
                value.write(out, Some(0));
            }
        }
    }
}

/// A sequence of top-level statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsProgram {
    pub body: Vec<Statement>,
}

impl JsProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.body.push(statement);
    }

    /// Insert an import after the leading imports.
    pub fn push_import(&mut self, import: ImportDeclaration) {
        let position = self
            .body
            .iter()
            .take_while(|s| matches!(s, Statement::Import(_)))
            .count();
        self.body.insert(position, Statement::Import(import));
    }

    /// Whether an import binding `local` already exists.
    pub fn imports(&self, local: &str) -> bool {
        self.body
            .iter()
            .any(|s| matches!(s, Statement::Import(import) if import.local == local))
    }

    /// The expression of `export default`, if any.
    pub fn default_export_mut(&mut self) -> Option<&mut Expression> {
        self.body.iter_mut().find_map(|statement| match statement {
            Statement::ExportDefault(expression) => Some(expression),
            _ => None,
        })
    }

    /// The object exported by `export default { ... }`, if any.
    pub fn default_export_object_mut(&mut self) -> Option<&mut ObjectExpression> {
        self.body.iter_mut().find_map(|statement| match statement {
            Statement::ExportDefault(Expression::Object(object)) => Some(object),
            _ => None,
        })
    }
}

impl SourceTree for JsProgram {
    fn to_source(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<&Statement> = None;
        for statement in &self.body {
            if let Some(previous) = previous {
                let both_imports =
                    matches!(previous, Statement::Import(_)) && matches!(statement, Statement::Import(_));
                out.push_str(if both_imports { "\n" } else { "\n\n" });
            }
            statement.write(&mut out);
            previous = Some(statement);
        }
        out
    }
}

pub(crate) fn write_string_literal(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Whether `name` can be used as a bare property key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_block_layout() {
        let object = ObjectExpression::new()
            .with_property("name", Expression::string("Card"))
            .with_property(
                "props",
                Expression::Object(
                    ObjectExpression::new().with_property("title", Expression::identifier("String")),
                ),
            )
            .with_property("empty", Expression::Object(ObjectExpression::new()));

        assert_eq!(
            Expression::Object(object).to_code(),
            "{\n  name: \"Card\",\n  props: {\n    title: String\n  },\n  empty: {}\n}"
        );
    }

    #[test]
    fn test_object_inline_layout() {
        let object = ObjectExpression::new()
            .with_property("color", Expression::string("red"))
            .with_property("font-size", Expression::NumericLiteral(12.0))
            .with_property("width", Expression::member("props", "width"));

        assert_eq!(
            Expression::Object(object).to_inline_code(),
            "{ color: \"red\", \"font-size\": 12, width: props.width }"
        );
    }

    #[test]
    fn test_program_spacing() {
        let mut program = JsProgram::new();
        program.push(Statement::Import(ImportDeclaration::default_import("React", "react")));
        program.push(Statement::Import(ImportDeclaration {
            local: "Picker".into(),
            source: "pickers".into(),
            named: true,
        }));
        program.push(Statement::ExportDefault(Expression::identifier("Card")));

        assert_eq!(
            program.to_source(),
            "import React from 'react'\nimport { Picker } from 'pickers'\n\nexport default Card"
        );
        assert!(program.imports("Picker"));
        program.push_import(ImportDeclaration::default_import("Card", "./Card"));
        assert!(matches!(&program.body[2], Statement::Import(i) if i.local == "Card"));
        assert!(program.imports("Card"));
        assert!(!program.imports("Missing"));
    }

    #[test]
    fn test_call_and_arrow() {
        let wrapped = Expression::call(
            Expression::call(
                Expression::identifier("injectSheet"),
                vec![Expression::identifier("styles")],
            ),
            vec![Expression::identifier("Card")],
        );
        assert_eq!(wrapped.to_code(), "injectSheet(styles)(Card)");

        let getter =
            Expression::arrow("props", Expression::member_path("props", &["classes", "card"]));
        assert_eq!(getter.to_inline_code(), "(props) => props.classes.card");

        let mut program = JsProgram::new();
        program.push(Statement::Const {
            name: "styles".into(),
            value: Expression::Object(ObjectExpression::new().with_property("card", getter)),
        });
        program.push(Statement::ExportDefault(Expression::identifier("Card")));
        *program.default_export_mut().unwrap() = wrapped;
        assert_eq!(
            program.to_source(),
            "const styles = {\n  card: (props) => props.classes.card\n}\n\nexport default injectSheet(styles)(Card)"
        );
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(Expression::string("say \"hi\"").to_code(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("ReactDatepicker"));
        assert!(is_identifier("$el"));
        assert!(!is_identifier("data-attr"));
        assert!(!is_identifier("1st"));
    }
}

//! Text rendering of a resolved model.
//!
//! # Example
//!
//! ```ignore
//! use stratum_resolve::{DisplayStyle, ModelDisplay};
//!
//! let display = ModelDisplay::new(&model)
//!     .style(DisplayStyle::Flattened)
//!     .indent("    ");
//!
//! println!("{}", display);
//! ```

use std::fmt;

use stratum_ir::{ResolvedClass, ResolvedField, ResolvedModel};

/// Which fields of a class are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Only the fields a class emits itself.
    ///
    /// ```text
    /// class Cat extends Animal
    ///   lives: Integer
    /// ```
    #[default]
    Members,

    /// Every effective field, inherited ones marked with their origin.
    ///
    /// ```text
    /// class Cat extends Animal
    ///   name: String (from Animal)
    ///   lives: Integer
    /// ```
    Flattened,
}

/// Declarative model display formatter.
#[derive(Debug, Clone)]
pub struct ModelDisplay<'a> {
    model: &'a ResolvedModel,
    style: DisplayStyle,
    indent_str: &'a str,
}

impl<'a> ModelDisplay<'a> {
    pub fn new(model: &'a ResolvedModel) -> Self {
        Self {
            model,
            style: DisplayStyle::default(),
            indent_str: "  ",
        }
    }

    pub fn style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the indentation string (default: two spaces).
    pub fn indent(mut self, indent: &'a str) -> Self {
        self.indent_str = indent;
        self
    }

    /// Render the model to a string.
    pub fn render(&self) -> String {
        let mut output = String::new();

        for class in self.model.classes.values().filter(|c| !c.is_enum()) {
            self.render_class(&mut output, class);
        }

        for def in &self.model.enums {
            output.push_str(&format!("enum {}\n", def.name));
            for member in &def.members {
                output.push_str(&format!(
                    "{}{} = {}\n",
                    self.indent_str,
                    member.ident,
                    member.literal.to_code_string()
                ));
            }
        }

        for spec in &self.model.deserializers {
            output.push_str(&format!(
                "deserializer {} for {} on '{}': {}\n",
                spec.name,
                spec.base,
                spec.discriminant,
                spec.variants.join(" | ")
            ));
        }

        output
    }

    fn render_class(&self, output: &mut String, class: &ResolvedClass) {
        output.push_str("class ");
        output.push_str(&class.name);
        if let Some(parent) = &class.parent_name {
            output.push_str(" extends ");
            output.push_str(parent);
        }
        if class.is_abstract {
            output.push_str(" [abstract]");
        }
        if let Some(target) = &class.deserializer_target {
            output.push_str(" -> ");
            output.push_str(target);
        }
        output.push('\n');

        for field in class.fields.values() {
            match self.style {
                DisplayStyle::Members if !field.is_member => continue,
                _ => self.render_field(output, class, field),
            }
        }
    }

    fn render_field(&self, output: &mut String, class: &ResolvedClass, field: &ResolvedField) {
        let optional = if field.required { "" } else { "?" };
        output.push_str(&format!(
            "{}{}{}: {}",
            self.indent_str, field.name, optional, field.target
        ));

        if !field.required_child_overrides.is_empty() {
            output.push_str(&format!(
                " [requires {}]",
                field.required_child_overrides.join(", ")
            ));
        }
        if !field.is_member {
            if field.declared_in == class.name {
                output.push_str(" (redeclared)");
            } else {
                output.push_str(&format!(" (from {})", field.declared_in));
            }
        }
        output.push('\n');
    }
}

impl fmt::Display for ModelDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use stratum_core::BackendConfig;

    use super::*;

    fn model(content: &str) -> ResolvedModel {
        let schema = stratum_schema::parse_str(content).expect("Failed to parse schema");
        crate::resolve(&schema, &BackendConfig::java())
            .expect("Failed to resolve")
            .model
    }

    const SCHEMA: &str = r#"
        [types.Animal.properties]
        name = "string"
        [types.Cat]
        type = "Animal"
        [types.Cat.properties]
        name = "string"
        "lives?" = "integer"
    "#;

    #[test]
    fn test_members_style() {
        let rendered = ModelDisplay::new(&model(SCHEMA)).render();
        assert_eq!(
            rendered,
            "class Animal [abstract]\n  name: String\nclass Cat extends Animal\n  lives?: Integer\n"
        );
    }

    #[test]
    fn test_flattened_style() {
        let rendered = ModelDisplay::new(&model(SCHEMA))
            .style(DisplayStyle::Flattened)
            .indent("    ")
            .to_string();
        assert_eq!(
            rendered,
            "class Animal [abstract]\n    name: String\nclass Cat extends Animal\n    \
             name: String (redeclared)\n    lives?: Integer\n"
        );
    }

    #[test]
    fn test_empty_model() {
        assert_eq!(ModelDisplay::new(&ResolvedModel::default()).render(), "");
    }
}

//! Structural validation of JSON documents
//!
//! A small, declarative schema engine: a [`Schema`] tree describes the
//! expected shape of a document, and [`validate`] walks the document against
//! it, collecting every violation as a path-qualified
//! [`ValidationIssue`](crate::error::ValidationIssue).
//!
//! Traversal order is deterministic: object keys are visited in document
//! order (required-key checks first, in schema order), array items in index
//! order. The first issue in the result is therefore the first violation a
//! reader scanning the document would encounter.
//!
//! String schemas may name a format. Formats are not built in; callers
//! register fallible checkers in a [`Formats`] table, which lets a checker
//! close over external state such as a name registry.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::ValidationIssue;

// ============================================================================
// Schema model
// ============================================================================

/// Expected shape of a JSON value.
#[derive(Debug)]
pub enum Schema {
    /// An object with declared properties
    Object(ObjectSchema),
    /// An array with uniform item shape
    Array(ArraySchema),
    /// A string, optionally constrained by a named format
    String(StringSchema),
    /// A number, optionally bounded below
    Number(NumberSchema),
}

impl Schema {
    /// An unconstrained string.
    #[must_use]
    pub const fn string() -> Self {
        Self::String(StringSchema { format: None })
    }

    /// A string that must satisfy the named format checker.
    #[must_use]
    pub const fn string_with_format(format: &'static str) -> Self {
        Self::String(StringSchema {
            format: Some(format),
        })
    }

    /// A number with an inclusive lower bound.
    #[must_use]
    pub const fn number_with_minimum(minimum: f64) -> Self {
        Self::Number(NumberSchema {
            minimum: Some(minimum),
        })
    }

    /// An array whose items all match `items`.
    #[must_use]
    pub fn array_of(items: Self) -> Self {
        Self::Array(ArraySchema {
            items: Box::new(items),
        })
    }

    /// An object with no declared properties whose values all match
    /// `values`. Keys are unconstrained.
    #[must_use]
    pub fn map_of(values: Self) -> Self {
        Self::Object(ObjectSchema {
            properties: vec![],
            required: vec![],
            additional: Additional::Schema(Box::new(values)),
        })
    }
}

/// Shape of a JSON object.
#[derive(Debug)]
pub struct ObjectSchema {
    /// Declared properties and their schemas
    pub properties: Vec<(&'static str, Schema)>,
    /// Property names that must be present
    pub required: Vec<&'static str>,
    /// Policy for keys not named in `properties`
    pub additional: Additional,
}

/// Policy for object keys not declared in `properties`.
#[derive(Debug)]
pub enum Additional {
    /// Undeclared keys are violations
    Forbid,
    /// Undeclared keys are accepted without inspection
    Allow,
    /// Undeclared keys are accepted and their values validated
    Schema(Box<Schema>),
}

/// Shape of a JSON array.
#[derive(Debug)]
pub struct ArraySchema {
    /// Schema every item must match
    pub items: Box<Schema>,
}

/// Shape of a JSON string.
#[derive(Debug)]
pub struct StringSchema {
    /// Name of a registered format checker, if any
    pub format: Option<&'static str>,
}

/// Shape of a JSON number.
#[derive(Debug)]
pub struct NumberSchema {
    /// Inclusive lower bound, if any
    pub minimum: Option<f64>,
}

// ============================================================================
// Format checkers
// ============================================================================

/// A fallible string-format checker. Returns a description of the problem
/// when the value does not satisfy the format.
pub type FormatCheck<'a> = Box<dyn Fn(&str) -> Result<(), String> + 'a>;

/// Named format checkers available during validation.
#[derive(Default)]
pub struct Formats<'a> {
    checks: HashMap<&'static str, FormatCheck<'a>>,
}

impl<'a> Formats<'a> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checks: HashMap::new(),
        }
    }

    /// Register a checker under `name`, replacing any previous checker with
    /// the same name.
    pub fn register<F>(&mut self, name: &'static str, check: F)
    where
        F: Fn(&str) -> Result<(), String> + 'a,
    {
        self.checks.insert(name, Box::new(check));
    }

    fn get(&self, name: &str) -> Option<&FormatCheck<'a>> {
        self.checks.get(name)
    }
}

impl fmt::Debug for Formats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.checks.keys().collect();
        names.sort_unstable();
        f.debug_struct("Formats").field("checks", &names).finish()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Outcome of validating a document.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Every violation found, in traversal order
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Whether any violation was found.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether the document conforms to the schema.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate `document` against `schema`, resolving named formats through
/// `formats`. Collects every violation rather than stopping at the first.
#[must_use]
pub fn validate(document: &Value, schema: &Schema, formats: &Formats<'_>) -> ValidationResult {
    let mut walker = Walker {
        formats,
        errors: Vec::new(),
    };
    walker.visit(document, schema, "");
    ValidationResult {
        errors: walker.errors,
    }
}

struct Walker<'f, 'a> {
    formats: &'f Formats<'a>,
    errors: Vec<ValidationIssue>,
}

impl Walker<'_, '_> {
    fn visit(&mut self, value: &Value, schema: &Schema, path: &str) {
        match schema {
            Schema::Object(object) => self.visit_object(value, object, path),
            Schema::Array(array) => self.visit_array(value, array, path),
            Schema::String(string) => self.visit_string(value, string, path),
            Schema::Number(number) => self.visit_number(value, number, path),
        }
    }

    fn visit_object(&mut self, value: &Value, schema: &ObjectSchema, path: &str) {
        let Some(map) = value.as_object() else {
            self.error(path, format!("expected an object, got {}", type_name(value)));
            return;
        };

        for key in &schema.required {
            if !map.contains_key(*key) {
                self.error(&join(path, key), "missing required property");
            }
        }

        // serde_json is built with preserve_order, so this walks keys in
        // document order.
        for (key, child) in map {
            let child_path = join(path, key);
            if let Some((_, property)) = schema
                .properties
                .iter()
                .find(|(name, _)| *name == key.as_str())
            {
                self.visit(child, property, &child_path);
            } else {
                match &schema.additional {
                    Additional::Forbid => self.error(&child_path, "unexpected property"),
                    Additional::Allow => {}
                    Additional::Schema(inner) => self.visit(child, inner, &child_path),
                }
            }
        }
    }

    fn visit_array(&mut self, value: &Value, schema: &ArraySchema, path: &str) {
        let Some(items) = value.as_array() else {
            self.error(path, format!("expected an array, got {}", type_name(value)));
            return;
        };

        for (index, item) in items.iter().enumerate() {
            self.visit(item, &schema.items, &format!("{path}[{index}]"));
        }
    }

    fn visit_string(&mut self, value: &Value, schema: &StringSchema, path: &str) {
        let Some(text) = value.as_str() else {
            self.error(path, format!("expected a string, got {}", type_name(value)));
            return;
        };

        if let Some(format_name) = schema.format {
            match self.formats.get(format_name) {
                Some(check) => {
                    if let Err(reason) = check(text) {
                        self.error(path, reason);
                    }
                }
                None => {
                    self.error(
                        path,
                        format!("no checker registered for format '{format_name}'"),
                    );
                }
            }
        }
    }

    fn visit_number(&mut self, value: &Value, schema: &NumberSchema, path: &str) {
        let Some(number) = value.as_f64() else {
            self.error(path, format!("expected a number, got {}", type_name(value)));
            return;
        };

        if let Some(minimum) = schema.minimum
            && number < minimum
        {
            self.error(
                path,
                format!("value {number} is below the minimum of {minimum}"),
            );
        }
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue::error(path, message));
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

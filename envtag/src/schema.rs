//! Explicit schema description: one `FieldSpec` per configuration field

use crate::annotation::Annotation;
use crate::error::EnvError;
use crate::value::FieldType;

/// Declaration of a single configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name, used in error messages and for assignment
    pub name: String,
    /// Declared semantic type
    pub ty: FieldType,
    /// Raw annotation, e.g. `CONCURRENCY;min=1`
    pub annotation: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType, annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            annotation: annotation.into(),
        }
    }
}

/// Ordered list of fields; declaration order is binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parse every annotation, stopping at the first malformed one.
    ///
    /// Runs before any environment lookup so that schema bugs surface
    /// regardless of what the environment contains.
    pub fn compile(&self) -> Result<Vec<(&FieldSpec, Annotation)>, EnvError> {
        self.fields
            .iter()
            .map(|spec| Annotation::parse(&spec.name, &spec.annotation).map(|a| (spec, a)))
            .collect()
    }
}

impl FromIterator<FieldSpec> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Registers fields one by one.
///
/// ```rust
/// use envtag::{FieldType, Schema};
///
/// let schema = Schema::builder()
///     .text("Environment", "ENVIRONMENT;oneof=development,test,staging,production")
///     .integer("Concurrency", "CONCURRENCY;min=1")
///     .field("Version", FieldType::Float, "VERSION;optional")
///     .build();
/// assert_eq!(schema.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, ty: FieldType, annotation: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::new(name, ty, annotation));
        self
    }

    pub fn text(self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.field(name, FieldType::Text, annotation)
    }

    pub fn integer(self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.field(name, FieldType::Integer, annotation)
    }

    pub fn float(self, name: impl Into<String>, annotation: impl Into<String>) -> Self {
        self.field(name, FieldType::Float, annotation)
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields,
        }
    }
}

//! Destination records the binder writes into

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::Schema;
use crate::value::{FieldType, Value};

/// A record whose fields can be set by name.
///
/// Implemented by `#[derive(EnvConfig)]`, or by hand for custom containers.
pub trait EnvRecord {
    /// Set `field` to `value`.
    ///
    /// Hands the value back when there is no such field or the field's
    /// declared type differs from the value's type.
    fn assign(&mut self, field: &str, value: Value) -> Result<(), Value>;
}

/// Record shaped by a runtime [`Schema`], for callers without a static struct.
///
/// Every field starts at its zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    entries: Vec<(String, FieldType, Value)>,
}

impl DynamicRecord {
    pub fn new(schema: &Schema) -> Self {
        let entries = schema
            .fields()
            .iter()
            .map(|spec| (spec.name.clone(), spec.ty, spec.ty.zero()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _, _)| name == field)
            .map(|(_, _, value)| value)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        match self.get(field)? {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        match self.get(field)? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Fields with their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, _, value)| (name.as_str(), value))
    }

    /// Each field rendered back to its environment-string form.
    pub fn to_env_strings(&self) -> Vec<(String, String)> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

impl EnvRecord for DynamicRecord {
    fn assign(&mut self, field: &str, value: Value) -> Result<(), Value> {
        // Duplicate names all receive the value, matching the schema's independent fields.
        let mut assigned = false;
        for (name, ty, slot) in &mut self.entries {
            if name == field && *ty == value.field_type() {
                *slot = value.clone();
                assigned = true;
            }
        }
        if assigned {
            Ok(())
        } else {
            Err(value)
        }
    }
}

impl Serialize for DynamicRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::builder()
            .text("Environment", "ENVIRONMENT")
            .integer("Concurrency", "CONCURRENCY")
            .float("Version", "VERSION;optional")
            .build()
    }

    #[test]
    fn test_starts_at_zero_values() {
        let record = DynamicRecord::new(&schema());
        assert_eq!(record.get_str("Environment"), Some(""));
        assert_eq!(record.get_i64("Concurrency"), Some(0));
        assert_eq!(record.get_f64("Version"), Some(0.0));
        assert_eq!(record.get("Missing"), None);
    }

    #[test]
    fn test_assign_checks_type() {
        let mut record = DynamicRecord::new(&schema());
        record.assign("Concurrency", Value::Integer(4)).unwrap();
        assert_eq!(record.get_i64("Concurrency"), Some(4));

        let rejected = record
            .assign("Concurrency", Value::Text("4".to_string()))
            .unwrap_err();
        assert_eq!(rejected, Value::Text("4".to_string()));
        assert_eq!(record.get_i64("Concurrency"), Some(4));
    }

    #[test]
    fn test_assign_unknown_field() {
        let mut record = DynamicRecord::new(&schema());
        assert!(record.assign("Nope", Value::Integer(1)).is_err());
    }

    #[test]
    fn test_serialize_as_object() {
        let mut record = DynamicRecord::new(&schema());
        record
            .assign("Environment", Value::Text("test".to_string()))
            .unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Environment": "test", "Concurrency": 0, "Version": 0.0})
        );
    }
}

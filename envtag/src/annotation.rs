//! Parsing of field annotations such as `ENVIRONMENT;oneof=development,test`.
//!
//! Grammar: `key[;clause]*` where each clause is either the bare word
//! `optional` or `kind=argument`. There is no escaping, so arguments cannot
//! contain `;`.

use tracing::warn;

use crate::error::EnvError;

const DELIMITER: char = ';';

/// A constraint clause following the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `oneof=a,b,c`
    OneOf(Vec<String>),
    /// `min=N`, argument kept as written
    Min(String),
    /// `max=N`, argument kept as written
    Max(String),
    /// `regex=PATTERN`
    Regex(String),
    /// `format=NAME`
    Format(String),
}

impl Constraint {
    /// The clause as it appears in the annotation, for diagnostics.
    pub fn clause(&self) -> String {
        match self {
            Self::OneOf(items) => format!("oneof={}", items.join(",")),
            Self::Min(arg) => format!("min={arg}"),
            Self::Max(arg) => format!("max={arg}"),
            Self::Regex(arg) => format!("regex={arg}"),
            Self::Format(arg) => format!("format={arg}"),
        }
    }
}

/// Parsed annotation of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Environment variable name
    pub key: String,
    /// Whether an `optional` clause is present anywhere in the annotation
    pub optional: bool,
    /// Constraint clauses in declaration order
    pub constraints: Vec<Constraint>,
}

impl Annotation {
    /// Split a raw annotation into its key and clauses.
    ///
    /// Empty segments and unknown clause kinds are skipped.
    pub fn parse(field: &str, raw: &str) -> Result<Self, EnvError> {
        if raw.is_empty() {
            return Err(EnvError::malformed(field, raw, "annotation is empty"));
        }

        let mut segments = raw.split(DELIMITER);
        let key = segments.next().unwrap_or_default();
        if key.is_empty() {
            return Err(EnvError::malformed(
                field,
                raw,
                "missing environment variable name",
            ));
        }
        if key.contains('=') {
            return Err(EnvError::malformed(
                field,
                raw,
                "environment variable name must come first and cannot contain '='",
            ));
        }

        let mut annotation = Self {
            key: key.to_string(),
            optional: false,
            constraints: Vec::new(),
        };

        for segment in segments {
            if segment.is_empty() {
                continue;
            }
            if segment == "optional" {
                annotation.optional = true;
                continue;
            }
            let Some((kind, argument)) = segment.split_once('=') else {
                warn!(field, clause = segment, "ignoring unrecognized annotation clause");
                continue;
            };
            let constraint = match kind {
                "oneof" => Constraint::OneOf(argument.split(',').map(str::to_string).collect()),
                "min" => Constraint::Min(argument.to_string()),
                "max" => Constraint::Max(argument.to_string()),
                "regex" => Constraint::Regex(argument.to_string()),
                "format" => Constraint::Format(argument.to_string()),
                _ => {
                    warn!(field, clause = segment, "ignoring unrecognized annotation clause");
                    continue;
                }
            };
            annotation.constraints.push(constraint);
        }

        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_only() {
        let annotation = Annotation::parse("ApiKey", "API_KEY").unwrap();
        assert_eq!(annotation.key, "API_KEY");
        assert!(!annotation.optional);
        assert!(annotation.constraints.is_empty());
    }

    #[test]
    fn test_parse_oneof() {
        let annotation = Annotation::parse(
            "Environment",
            "ENVIRONMENT;oneof=development,test,staging,production",
        )
        .unwrap();
        assert_eq!(
            annotation.constraints,
            vec![Constraint::OneOf(vec![
                "development".to_string(),
                "test".to_string(),
                "staging".to_string(),
                "production".to_string(),
            ])]
        );
    }

    #[test]
    fn test_parse_keeps_declaration_order() {
        let annotation =
            Annotation::parse("Port", "PORT;max=65535;optional;min=1;format=URL").unwrap();
        assert!(annotation.optional);
        assert_eq!(
            annotation.constraints,
            vec![
                Constraint::Max("65535".to_string()),
                Constraint::Min("1".to_string()),
                Constraint::Format("URL".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_skips_empty_and_unknown_clauses() {
        let annotation =
            Annotation::parse("ApiUrl", "API_URL;;format=URL;secret;len=3;").unwrap();
        assert_eq!(annotation.key, "API_URL");
        assert!(!annotation.optional);
        assert_eq!(
            annotation.constraints,
            vec![Constraint::Format("URL".to_string())]
        );
    }

    #[test]
    fn test_parse_regex_is_taken_verbatim() {
        let annotation = Annotation::parse(
            "PubsubHostURL",
            "PUBSUB_EMULATOR_HOST;regex='(http|https)://(localhost|127.0.0.1):[0-9]+'",
        )
        .unwrap();
        assert_eq!(
            annotation.constraints,
            vec![Constraint::Regex(
                "'(http|https)://(localhost|127.0.0.1):[0-9]+'".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_regex_may_contain_equals() {
        let annotation = Annotation::parse("Query", "QUERY;regex=^a=b$").unwrap();
        assert_eq!(
            annotation.constraints,
            vec![Constraint::Regex("^a=b$".to_string())]
        );
    }

    #[test]
    fn test_parse_empty_annotation() {
        let result = Annotation::parse("Field", "");
        assert!(matches!(result, Err(EnvError::MalformedAnnotation { .. })));
    }

    #[test]
    fn test_parse_empty_key() {
        let result = Annotation::parse("Field", ";optional");
        match result {
            Err(EnvError::MalformedAnnotation {
                field, annotation, ..
            }) => {
                assert_eq!(field, "Field");
                assert_eq!(annotation, ";optional");
            }
            other => panic!("Expected MalformedAnnotation, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_key_with_equals() {
        let result = Annotation::parse("Field", "min=1;optional");
        assert!(matches!(result, Err(EnvError::MalformedAnnotation { .. })));
    }

    #[test]
    fn test_constraint_clause_text() {
        assert_eq!(
            Constraint::OneOf(vec!["a".to_string(), "b".to_string()]).clause(),
            "oneof=a,b"
        );
        assert_eq!(Constraint::Min("1".to_string()).clause(), "min=1");
    }
}

//! Presence and constraint checks on the raw environment value

use regex::Regex;
use tracing::warn;
use url::Url;

use crate::annotation::{Annotation, Constraint};
use crate::error::EnvError;

/// Outcome of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Optional and absent: the field keeps its zero value
    Skipped,
    /// Present and every constraint passed: ready for coercion
    Present,
}

/// Check presence, then every constraint in declaration order.
///
/// `raw` is `None` when the variable is unset; an empty string counts as absent too.
pub fn validate(
    field: &str,
    annotation: &Annotation,
    raw: Option<&str>,
) -> Result<Presence, EnvError> {
    let key = annotation.key.as_str();
    let value = match raw {
        Some(value) if !value.is_empty() => value,
        _ if annotation.optional => return Ok(Presence::Skipped),
        _ => return Err(EnvError::missing(key, field)),
    };

    for constraint in &annotation.constraints {
        check(field, key, constraint, value)?;
    }

    Ok(Presence::Present)
}

fn check(field: &str, key: &str, constraint: &Constraint, value: &str) -> Result<(), EnvError> {
    match constraint {
        Constraint::OneOf(allowed) => {
            if allowed.iter().any(|item| item == value) {
                return Ok(());
            }
            Err(EnvError::NotInAllowedSet {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                allowed: allowed.join(","),
            })
        }
        Constraint::Min(bound) => {
            let min = parse_bound(field, key, constraint, bound)?;
            if value.parse::<f64>().is_ok_and(|v| v >= min) {
                return Ok(());
            }
            Err(EnvError::BelowMinimum {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                min: bound.clone(),
            })
        }
        Constraint::Max(bound) => {
            let max = parse_bound(field, key, constraint, bound)?;
            if value.parse::<f64>().is_ok_and(|v| v <= max) {
                return Ok(());
            }
            Err(EnvError::AboveMaximum {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                max: bound.clone(),
            })
        }
        Constraint::Regex(pattern) => {
            let re = Regex::new(pattern).map_err(|e| EnvError::InvalidConstraintDefinition {
                key: key.to_string(),
                field: field.to_string(),
                clause: constraint.clause(),
                message: e.to_string(),
            })?;
            if re.is_match(value) {
                return Ok(());
            }
            Err(EnvError::PatternMismatch {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                pattern: pattern.clone(),
            })
        }
        Constraint::Format(format) if format == "URL" => {
            if is_http_url(value) {
                return Ok(());
            }
            Err(EnvError::InvalidFormat {
                key: key.to_string(),
                field: field.to_string(),
                value: value.to_string(),
                format: format.clone(),
            })
        }
        Constraint::Format(format) => {
            warn!(field, format = format.as_str(), "format is not enforced");
            Ok(())
        }
    }
}

fn parse_bound(
    field: &str,
    key: &str,
    constraint: &Constraint,
    bound: &str,
) -> Result<f64, EnvError> {
    bound
        .parse::<f64>()
        .map_err(|e| EnvError::InvalidConstraintDefinition {
            key: key.to_string(),
            field: field.to_string(),
            clause: constraint.clause(),
            message: e.to_string(),
        })
}

/// Absolute `http`/`https` URL with a non-empty host.
fn is_http_url(value: &str) -> bool {
    if !has_written_host(value) {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Whether `scheme://authority` is spelled out with a host.
///
/// The WHATWG parser repairs `http:example.com` or `https:///x` into URLs with
/// a host, so the host has to be checked on the raw text.
fn has_written_host(value: &str) -> bool {
    let Some((_, rest)) = value.split_once(':') else {
        return false;
    };
    let Some(rest) = rest.strip_prefix("//") else {
        return false;
    };
    let authority = rest
        .split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = match host_port.strip_prefix('[') {
        Some(v6) => v6.split(']').next().unwrap_or_default(),
        None => host_port.split(':').next().unwrap_or_default(),
    };
    !host.is_empty()
}

//! Driver: walk the schema in order and bind each field

use tracing::{debug, info};

use crate::error::EnvError;
use crate::lookup::Lookup;
use crate::record::EnvRecord;
use crate::schema::Schema;
use crate::validate::{validate, Presence};
use crate::value::coerce;

/// Populate `record` from `lookup` according to `schema`.
///
/// All annotations are parsed and every field is reset to its zero value
/// before the first lookup, so a record can be reused across calls. Fields are
/// then bound in declaration order and the first failure aborts the call;
/// fields bound before it keep their new values, the rest stay at zero.
///
/// ```rust
/// use std::collections::HashMap;
/// use envtag::{bind, DynamicRecord, Schema};
///
/// let schema = Schema::builder()
///     .text("Environment", "ENVIRONMENT;oneof=development,test,staging,production")
///     .integer("Concurrency", "CONCURRENCY;min=1")
///     .build();
/// let env: HashMap<String, String> = [
///     ("ENVIRONMENT".to_string(), "staging".to_string()),
///     ("CONCURRENCY".to_string(), "3".to_string()),
/// ]
/// .into();
///
/// let mut record = DynamicRecord::new(&schema);
/// bind(&schema, &mut record, &env).unwrap();
/// assert_eq!(record.get_str("Environment"), Some("staging"));
/// assert_eq!(record.get_i64("Concurrency"), Some(3));
/// ```
pub fn bind<R, L>(schema: &Schema, record: &mut R, lookup: &L) -> Result<(), EnvError>
where
    R: EnvRecord + ?Sized,
    L: Lookup + ?Sized,
{
    let fields = schema.compile()?;
    info!(fields = fields.len(), "loading environment configuration");

    for (spec, annotation) in &fields {
        record.assign(&spec.name, spec.ty.zero()).map_err(|rejected| {
            EnvError::assignment(annotation.key.as_str(), spec.name.as_str(), spec.ty, &rejected)
        })?;
    }

    for (spec, annotation) in &fields {
        let field = spec.name.as_str();
        let key = annotation.key.as_str();
        let raw = lookup.lookup(key);

        match validate(field, annotation, raw.as_deref())? {
            Presence::Skipped => {
                debug!(field, key, "optional variable not set, keeping zero value");
            }
            Presence::Present => {
                let value = coerce(field, key, spec.ty, raw.as_deref().unwrap_or_default())?;
                record
                    .assign(field, value)
                    .map_err(|rejected| EnvError::assignment(key, field, spec.ty, &rejected))?;
                debug!(field, key, "bound");
            }
        }
    }

    info!("environment configuration loaded");
    Ok(())
}

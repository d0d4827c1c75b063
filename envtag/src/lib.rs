//! Bind environment variables into typed configuration using declarative annotations
//!
//! Every configuration field carries an annotation string naming its environment
//! variable and the constraints its value must satisfy:
//!
//! ```text
//! ENVIRONMENT;oneof=development,test,staging,production
//! CONCURRENCY;optional;min=1
//! API_URL;format=URL
//! ```
//!
//! The first `;`-separated segment is the variable name, the rest are clauses.
//!
//! # Clauses
//!
//! | Clause          | Check on the raw value                                     |
//! |-----------------|------------------------------------------------------------|
//! | `optional`      | Unset or empty is allowed; the field keeps its zero value  |
//! | `oneof=a,b,c`   | Equals one of the listed literals (case-sensitive)         |
//! | `min=N`         | Parses as a float and is `>= N`                            |
//! | `max=N`         | Parses as a float and is `<= N`                            |
//! | `regex=PATTERN` | Pattern is found somewhere in the value                    |
//! | `format=URL`    | Absolute `http`/`https` URL with a host                    |
//!
//! Without `optional`, an unset or empty variable is an error. Unknown clause
//! kinds and unknown `format=` names are ignored so that annotations written
//! for newer versions keep working.
//!
//! Constraints run on the raw string before it is converted to the field's
//! type, in the order they are written. A non-numeric value for a field with
//! `min=` therefore fails as [`EnvError::BelowMinimum`], while the same value
//! without a bound fails as [`EnvError::Coercion`].
//!
//! # Field types
//!
//! - `String` ([`FieldType::Text`]): any value
//! - `i64` ([`FieldType::Integer`]): base-10 integer, optional sign
//! - `f64` ([`FieldType::Float`]): decimal or scientific notation
//!
//! # Example
//!
//! ```rust
//! use envtag::EnvConfig;
//!
//! #[derive(Debug, EnvConfig)]
//! struct AppEnv {
//!     #[env("ENVIRONMENT;oneof=development,test,staging,production")]
//!     pub environment: String,
//!
//!     #[env("VERSION;optional")]
//!     pub version: f64,
//!
//!     #[env("CONCURRENCY;min=1")]
//!     pub concurrency: i64,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("ENVIRONMENT", "staging");
//! #     std::env::set_var("CONCURRENCY", "3");
//! #     std::env::remove_var("VERSION");
//! let env = AppEnv::from_env()?;
//! assert_eq!(env.environment, "staging");
//! assert_eq!(env.version, 0.0);
//! assert_eq!(env.concurrency, 3);
//! #     Ok(())
//! # }
//! ```
//!
//! # Without a derive
//!
//! A [`Schema`] can be registered by hand and bound into a [`DynamicRecord`]
//! (or any [`EnvRecord`]) with [`bind`], reading from any [`Lookup`].

mod annotation;
mod bind;
mod error;
mod lookup;
mod record;
mod schema;
mod validate;
mod value;

pub use annotation::{Annotation, Constraint};
pub use bind::bind;
pub use envtag_derive::EnvConfig;
pub use error::EnvError;
pub use lookup::{lookup_fn, FnLookup, Lookup, ProcessEnv};
pub use record::{DynamicRecord, EnvRecord};
pub use schema::{FieldSpec, Schema, SchemaBuilder};
pub use validate::{validate, Presence};
pub use value::{coerce, FieldType, Value};

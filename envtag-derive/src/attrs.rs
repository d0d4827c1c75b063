//! Attribute parsing for `#[env("...")]` annotations.
//!
//! This module extracts the annotation string from struct fields and maps the
//! field's Rust type onto the declared type the binder understands.

use syn::{Field, LitStr, PathArguments, Type};

/// Declared type of a field, mirrored from `envtag::FieldType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Text,
    Integer,
    Float,
}

impl DeclaredType {
    /// Map a field type to its declared type.
    ///
    /// Only `String`, `i64` and `f64` are accepted; the binder assigns values
    /// only when the types match exactly.
    pub fn from_type(ty: &Type) -> Option<Self> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let seg = type_path.path.segments.last()?;
        if !matches!(seg.arguments, PathArguments::None) {
            return None;
        }
        if seg.ident == "String" {
            Some(Self::Text)
        } else if seg.ident == "i64" {
            Some(Self::Integer)
        } else if seg.ident == "f64" {
            Some(Self::Float)
        } else {
            None
        }
    }
}

/// Parsed `#[env("...")]` attribute of a struct field.
#[derive(Debug)]
pub struct FieldAttrs {
    /// Raw annotation string, e.g. `CONCURRENCY;min=1`
    pub annotation: LitStr,
}

impl FieldAttrs {
    /// Extract the `#[env("...")]` attribute from a struct field.
    ///
    /// Attributes other than `env` are left for other macros. A missing
    /// attribute, a repeated one, or an annotation without a usable key is an error.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut annotation: Option<LitStr> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }
            if annotation.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate env attribute"));
            }
            annotation = Some(attr.parse_args::<LitStr>()?);
        }

        let Some(annotation) = annotation else {
            return Err(syn::Error::new_spanned(
                field,
                "missing env annotation, e.g. #[env(\"ENVIRONMENT;optional\")]",
            ));
        };

        let raw = annotation.value();
        let key = raw.split(';').next().unwrap_or_default();
        if key.is_empty() {
            return Err(syn::Error::new_spanned(
                &annotation,
                "env annotation must start with the environment variable name",
            ));
        }
        if key.contains('=') {
            return Err(syn::Error::new_spanned(
                &annotation,
                "environment variable name cannot contain '='",
            ));
        }

        Ok(Self { annotation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_annotation() {
        let field: Field = parse_quote! {
            #[env("ENVIRONMENT;oneof=development,test")]
            pub environment: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.value(), "ENVIRONMENT;oneof=development,test");
    }

    #[test]
    fn test_ignores_other_attributes() {
        let field: Field = parse_quote! {
            #[allow(dead_code)]
            #[env("PORT;optional")]
            pub port: i64
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.annotation.value(), "PORT;optional");
    }

    #[test]
    fn test_missing_attribute() {
        let field: Field = parse_quote! {
            pub port: i64
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_duplicate_attribute() {
        let field: Field = parse_quote! {
            #[env("PORT")]
            #[env("OTHER_PORT")]
            pub port: i64
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_empty_key() {
        let field: Field = parse_quote! {
            #[env(";optional")]
            pub port: i64
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_key_with_equals() {
        let field: Field = parse_quote! {
            #[env("min=1")]
            pub port: i64
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_declared_types() {
        let text: Type = parse_quote!(String);
        let qualified: Type = parse_quote!(std::string::String);
        let integer: Type = parse_quote!(i64);
        let float: Type = parse_quote!(f64);
        assert_eq!(DeclaredType::from_type(&text), Some(DeclaredType::Text));
        assert_eq!(DeclaredType::from_type(&qualified), Some(DeclaredType::Text));
        assert_eq!(DeclaredType::from_type(&integer), Some(DeclaredType::Integer));
        assert_eq!(DeclaredType::from_type(&float), Some(DeclaredType::Float));
    }

    #[test]
    fn test_unsupported_types() {
        let types: [Type; 5] = [
            parse_quote!(u16),
            parse_quote!(bool),
            parse_quote!(Vec<String>),
            parse_quote!(Option<String>),
            parse_quote!(&'static str),
        ];
        for ty in &types {
            assert_eq!(DeclaredType::from_type(ty), None);
        }
    }
}

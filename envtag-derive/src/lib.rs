//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{DeclaredType, FieldAttrs};

/// `EnvConfig` derive macro
///
/// Generates `schema()`, `from_lookup()` and `from_env()` on the struct and
/// implements `envtag::EnvRecord` for it.
///
/// Every field must carry `#[env("KEY[;clause]*")]` and be one of `String`,
/// `i64` or `f64`.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvConfig, attributes(env))]
pub fn derive_envconfig(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvConfig only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvConfig only supports structs",
            ));
        }
    };

    let mut specs = Vec::new();
    let mut zero_initializers = Vec::new();
    let mut assign_arms = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;
        let declared = DeclaredType::from_type(field_type).ok_or_else(|| {
            syn::Error::new_spanned(
                field_type,
                "unsupported field type for EnvConfig, expected String, i64 or f64",
            )
        })?;

        let name = field_name.unraw().to_string();
        let annotation = &attrs.annotation;
        let (field_type_expr, variant) = match declared {
            DeclaredType::Text => (quote!(::envtag::FieldType::Text), quote!(Text)),
            DeclaredType::Integer => (quote!(::envtag::FieldType::Integer), quote!(Integer)),
            DeclaredType::Float => (quote!(::envtag::FieldType::Float), quote!(Float)),
        };

        specs.push(quote! {
            .field(#name, #field_type_expr, #annotation)
        });
        zero_initializers.push(quote! {
            #field_name: ::core::default::Default::default()
        });
        assign_arms.push(quote! {
            (#name, ::envtag::Value::#variant(__v)) => {
                self.#field_name = __v;
                ::core::result::Result::Ok(())
            }
        });
    }

    Ok(quote! {
        impl #impl_generics ::envtag::EnvRecord for #struct_name #ty_generics #where_clause {
            fn assign(
                &mut self,
                field: &str,
                value: ::envtag::Value,
            ) -> ::core::result::Result<(), ::envtag::Value> {
                match (field, value) {
                    #(#assign_arms)*
                    (_, __other) => ::core::result::Result::Err(__other),
                }
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Field declarations in binding order
            pub fn schema() -> ::envtag::Schema {
                ::envtag::Schema::builder()
                    #(#specs)*
                    .build()
            }

            /// Load configuration through the given lookup
            ///
            /// # Errors
            ///
            /// - An annotation is malformed
            /// - A required variable is unset or empty
            /// - A value violates a constraint or cannot be parsed into the field type
            pub fn from_lookup<__L>(lookup: &__L) -> ::core::result::Result<Self, ::envtag::EnvError>
            where
                __L: ::envtag::Lookup + ?Sized,
            {
                let mut record = Self {
                    #(#zero_initializers),*
                };
                ::envtag::bind(&Self::schema(), &mut record, lookup)?;
                ::core::result::Result::Ok(record)
            }

            /// Load configuration from the process environment
            ///
            /// # Errors
            ///
            /// See `from_lookup`.
            pub fn from_env() -> ::core::result::Result<Self, ::envtag::EnvError> {
                Self::from_lookup(&::envtag::ProcessEnv)
            }
        }
    })
}

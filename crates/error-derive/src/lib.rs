//! `#[derive(Error)]` for error enums.
//!
//! Every variant carries a `#[msg = "..."]` attribute which becomes its [Display](std::fmt::Display)
//! output. Depending on the shape of the variant, the derive does a bit more:
//!
//! * Unit variants print their message as-is.
//! * Tuple variants must have exactly one field. The field is reported as the
//!   [source](std::error::Error::source) of the error and a `From` impl is generated,
//!   which makes `?` convert the wrapped error automatically.
//! * Variants with named fields may refer to their fields inside the message,
//!   like `#[msg = "unknown option {flag}"]`. A field called `source` is reported as the
//!   source of the error.
//!
//! ```ignore
//! #[derive(Debug, Error)]
//! pub enum ValueError {
//!     #[msg = "not an integer"]
//!     Int(std::num::ParseIntError),
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;

#[proc_macro_derive(Error, attributes(msg))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    let item: syn::ItemEnum = match syn::parse(input) {
        Ok(item) => item,
        Err(error) => return error.to_compile_error().into(),
    };

    match expand(&item) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(item: &syn::ItemEnum) -> syn::Result<proc_macro2::TokenStream> {
    let name = &item.ident;
    let mut variant_displays = vec![];
    let mut from_impls = vec![];
    let mut variant_sources = vec![];

    for variant in &item.variants {
        let ident = &variant.ident;
        let message = message_of(variant)?;

        match &variant.fields {
            syn::Fields::Unit => {
                variant_displays.push(quote!(Self::#ident => ::std::fmt::Display::fmt(&(#message), f)));
            },
            syn::Fields::Unnamed(unnamed_fields) => {
                if unnamed_fields.unnamed.len() != 1 {
                    return Err(syn::Error::new_spanned(
                        unnamed_fields,
                        "tuple variants need exactly one field",
                    ));
                }

                let ty = &unnamed_fields.unnamed[0].ty;

                from_impls.push(quote!(
                    #[automatically_derived]
                    impl From<#ty> for #name {
                        fn from(value: #ty) -> Self {
                            Self::#ident(value)
                        }
                    }
                ));
                variant_displays.push(quote!(Self::#ident(_) => ::std::fmt::Display::fmt(&(#message), f)));
                variant_sources.push(quote!(
                    Self::#ident(value) => Some(value as &(dyn ::std::error::Error + 'static))
                ));
            },
            syn::Fields::Named(named_fields) => {
                let fields: Vec<&syn::Ident> = named_fields
                    .named
                    .iter()
                    .flat_map(|field| field.ident.as_ref())
                    .collect();

                // The field bindings keep the span of the user's field names,
                // so the message can capture them implicitly
                variant_displays.push(quote!(
                    Self::#ident { #( #fields ),* } => write!(f, #message)
                ));

                if fields.iter().any(|field| *field == "source") {
                    variant_sources.push(quote!(
                        Self::#ident { source, .. } => Some(source as &(dyn ::std::error::Error + 'static))
                    ));
                }
            },
        }
    }

    Ok(quote!(
        #[automatically_derived]
        impl ::std::fmt::Display for #name {
            #[allow(unused_variables)]
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> Result<(), ::std::fmt::Error> {
                match self {
                    #(
                        #variant_displays,
                    )*
                }
            }
        }

        #(
            #from_impls
        )*

        #[automatically_derived]
        impl ::std::error::Error for #name {
            #[allow(unreachable_patterns)]
            fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    #(
                        #variant_sources,
                    )*
                    _ => None,
                }
            }
        }
    ))
}

/// Finds the `#[msg = "..."]` attribute of a variant
fn message_of(variant: &syn::Variant) -> syn::Result<&syn::Expr> {
    variant
        .attrs
        .iter()
        .flat_map(|attr| match &attr.meta {
            syn::Meta::NameValue(name_value) => Some(name_value),
            _ => None,
        })
        .find(|name_value| name_value.path.is_ident("msg"))
        .map(|name_value| &name_value.value)
        .ok_or_else(|| syn::Error::new_spanned(variant, "missing #[msg = \"...\"] attribute"))
}

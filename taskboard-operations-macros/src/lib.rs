//! Procedural macros for defining operations
//!
//! This crate provides the `#[operation]` attribute macro that attaches
//! verb/noun/description metadata (and an optional permission requirement)
//! to a command struct.

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, DeriveInput, Ident, Lit, Token,
};

/// Attribute macro for defining an operation
///
/// # Usage
///
/// ```ignore
/// #[operation(
///     verb = "move",
///     noun = "task",
///     description = "Move a task to a column and position",
///     permission = "move_task"
/// )]
/// #[derive(Debug, Deserialize, Serialize)]
/// pub struct MoveTask {
///     /// The task to move
///     pub id: TaskId,
///     /// Destination column
///     pub column: ColumnId,
/// }
/// ```
///
/// `permission` is optional; operations without it are open to every role.
#[proc_macro_attribute]
pub fn operation(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as OperationArgs);
    let input = parse_macro_input!(item as DeriveInput);

    match &input.data {
        syn::Data::Struct(data) => {
            if let syn::Fields::Unnamed(fields) = &data.fields {
                return syn::Error::new_spanned(
                    fields,
                    "operation macro does not support tuple structs",
                )
                .to_compile_error()
                .into();
            }
        }
        _ => {
            return syn::Error::new_spanned(&input.ident, "operation macro only supports structs")
                .to_compile_error()
                .into();
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let verb = &args.verb;
    let noun = &args.noun;
    let description = &args.description;

    let permission = match &args.permission {
        Some(p) => quote! { ::core::option::Option::Some(#p) },
        None => quote! { ::core::option::Option::None },
    };

    let expanded = quote! {
        #input

        impl #impl_generics taskboard_operations::Operation for #name #ty_generics #where_clause {
            fn verb(&self) -> &'static str {
                #verb
            }

            fn noun(&self) -> &'static str {
                #noun
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn permission(&self) -> ::core::option::Option<&'static str> {
                #permission
            }
        }
    };

    TokenStream::from(expanded)
}

/// Arguments for the #[operation(...)] attribute
struct OperationArgs {
    verb: String,
    noun: String,
    description: String,
    permission: Option<String>,
}

impl Parse for OperationArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut verb = None;
        let mut noun = None;
        let mut description = None;
        let mut permission = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;

            let value_str = match value {
                Lit::Str(s) => s.value(),
                _ => return Err(syn::Error::new_spanned(value, "expected string literal")),
            };

            match ident.to_string().as_str() {
                "verb" => verb = Some(value_str),
                "noun" => noun = Some(value_str),
                "description" => description = Some(value_str),
                "permission" => permission = Some(value_str),
                other => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        format!("unknown attribute: {}", other),
                    ))
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(OperationArgs {
            verb: verb.ok_or_else(|| input.error("missing 'verb' attribute"))?,
            noun: noun.ok_or_else(|| input.error("missing 'noun' attribute"))?,
            description: description
                .ok_or_else(|| input.error("missing 'description' attribute"))?,
            permission,
        })
    }
}

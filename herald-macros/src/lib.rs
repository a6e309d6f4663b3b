//! Procedural macros for Herald.
//!
//! - `#[derive(Message)]` - marks a payload type as publishable

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for implementing the `Message` trait.
///
/// Generic parameters get `Send + Sync + 'static` bounds added, matching the
/// supertraits of `Message`.
#[proc_macro_derive(Message)]
pub fn derive_message(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);
    let name = input.ident.clone();

    for param in input.generics.type_params_mut() {
        param
            .bounds
            .push(syn::parse_quote!(::core::marker::Send));
        param
            .bounds
            .push(syn::parse_quote!(::core::marker::Sync));
        param.bounds.push(syn::parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::herald::Message for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

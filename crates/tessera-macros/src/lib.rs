// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for Tessera component types.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// A derive macro that implements the `tessera_data::ecs::Component` trait.
///
/// The generated impl only compiles when the type meets the trait's supertrait
/// bounds (`Clone`, `Send`, `Sync`, `'static`), so a type that cannot be
/// duplicated is rejected at build time.
#[proc_macro_derive(Component)]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::tessera_data::ecs::Component for #name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

/// A derive macro for payload-free marker components.
///
/// Implements both `Component` and `TagComponent`. For non-generic types it
/// also emits a compile-time assertion that the type is zero-sized, so a tag
/// that grows a field stops building instead of silently carrying data.
#[proc_macro_derive(TagComponent)]
pub fn derive_tag_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let size_check = if input.generics.params.is_empty() {
        let message = format!("tag component `{name}` must not carry any data");
        quote! {
            const _: () = ::core::assert!(::core::mem::size_of::<#name>() == 0, #message);
        }
    } else {
        quote! {}
    };

    let expanded = quote! {
        impl #impl_generics ::tessera_data::ecs::Component for #name #ty_generics #where_clause {}
        impl #impl_generics ::tessera_data::ecs::TagComponent for #name #ty_generics #where_clause {}
        #size_check
    };

    TokenStream::from(expanded)
}

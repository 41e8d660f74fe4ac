//! Procedural macros for `config_binder`.
//!
//! `#[derive(Bind)]` inspects a struct's fields once, at compile time, and
//! emits a `Bind` implementation that hands the binder one typed slot per
//! tagged field. Tags are written as `#[bind(...)]` attributes:
//!
//! - `config = "key"`: source key, highest priority.
//! - `data = "key"`: source and nested-JSON key; also the display key.
//!   A field-level `#[serde(rename = "...")]` or a struct-level
//!   `rename_all` supplies it for fields without any `bind` key.
//! - `secret = "key"`: source key that forces the deferred secret path.
//! - `required`: the key must exist unless the field is already populated.
//! - `skip`: the field is neither bound nor displayed.
//!
//! On the struct, `crate = "path"` points generated code at an aliased
//! runtime crate and `rename_all = "camelCase"` (or any serde casing) derives
//! data keys from field names.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `config_binder::Bind` and `config_binder::Field`.
#[proc_macro_derive(Bind, attributes(bind))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

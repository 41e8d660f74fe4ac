//! Expansion of `#[derive(Bind)]`.

mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let model = parse::parse_input(input)?;
    Ok(generate::bind_impl(&model, &model.runtime_crate()))
}

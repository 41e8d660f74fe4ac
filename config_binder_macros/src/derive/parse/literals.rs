//! Literal parsing helpers for derive attributes.

use syn::{Lit, LitStr};

/// Parses a string literal value such as `key = "value"`.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(value) => Ok(value),
        other => Err(syn::Error::new(
            other.span(),
            format!("{key} must be a string"),
        )),
    }
}

//! Parsing utilities for the `Bind` derive macro.

use syn::parenthesized;
use syn::{Attribute, Token};

mod input;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{FieldModel, StructModel, parse_input};
use literals::lit_str;
pub(crate) use serde_attrs::{SerdeRenameAll, serde_field_rename, serde_rename_all};
pub(crate) use type_utils::unsupported_kind;

/// Struct-level `#[bind(...)]` attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
    /// Casing applied to field names that carry no key tag.
    pub rename_all: Option<SerdeRenameAll>,
}

/// Field-level `#[bind(...)]` attributes.
///
/// - `config`, `data` and `secret` name the key the field is read from, in
///   that priority order.
/// - `required` demands the key unless the field is already populated.
/// - `skip` hides the field from binding and display.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub config: Option<String>,
    pub data: Option<String>,
    pub secret: Option<String>,
    pub required: bool,
    pub skip: bool,
}

impl FieldAttrs {
    pub(crate) const fn has_key(&self) -> bool {
        self.config.is_some() || self.data.is_some() || self.secret.is_some()
    }
}

/// Iterate all `#[bind(...)]` attributes once and apply a callback.
fn parse_bind<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("bind")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

fn set_once(slot: &mut Option<String>, meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<()> {
    let value = lit_str(meta, key)?;
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` attribute")));
    }
    *slot = Some(value.value());
    Ok(())
}

/// Parses struct-level attributes: `crate` and `rename_all`.
///
/// A `#[bind(rename_all)]` takes precedence over `#[serde(rename_all)]`.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_bind(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let path = lit_str(meta, "crate")?;
            out.crate_path = Some(path.parse()?);
            Ok(())
        } else if meta.path.is_ident("rename_all") {
            let rule = lit_str(meta, "rename_all")?;
            out.rename_all = Some(SerdeRenameAll::parse(&rule)?);
            Ok(())
        } else {
            Err(meta.error("unknown struct-level `bind` attribute"))
        }
    })?;
    if out.rename_all.is_none() {
        out.rename_all = serde_rename_all(attrs)?;
    }
    Ok(out)
}

/// Parses field-level attributes.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_bind(attrs, |meta| {
        if meta.path.is_ident("config") {
            set_once(&mut out.config, meta, "config")
        } else if meta.path.is_ident("data") {
            set_once(&mut out.data, meta, "data")
        } else if meta.path.is_ident("secret") {
            set_once(&mut out.secret, meta, "secret")
        } else if meta.path.is_ident("required") {
            out.required = true;
            Ok(())
        } else if meta.path.is_ident("skip") {
            out.skip = true;
            Ok(())
        } else {
            Err(meta.error("unknown field-level `bind` attribute"))
        }
    })?;
    Ok(out)
}

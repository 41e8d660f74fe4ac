//! Input parsing for the `Bind` derive macro.
//!
//! Gathers the struct identifier, generics and per-field metadata in one
//! pass so invalid attribute combinations fail expansion early.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields};

use super::{FieldAttrs, parse_field_attrs, parse_struct_attrs, serde_field_rename, unsupported_kind};

/// Everything the generator needs to know about the struct.
pub(crate) struct StructModel {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<FieldModel>,
}

impl StructModel {
    /// Prefix for runtime paths in generated code: `config_binder` unless
    /// `#[bind(crate = "..")]` renamed the dependency.
    pub(crate) fn runtime_crate(&self) -> TokenStream {
        self.crate_path
            .as_ref()
            .map_or_else(|| quote! { config_binder }, ToTokens::to_token_stream)
    }
}

/// One named field with its resolved keys.
pub(crate) struct FieldModel {
    pub ident: syn::Ident,
    /// Field name without any raw-identifier prefix.
    pub name: String,
    pub attrs: FieldAttrs,
    /// Set when the type can never be bound.
    pub unsupported: Option<&'static str>,
}

impl FieldModel {
    /// Whether the binder sees the field.
    pub(crate) const fn is_tagged(&self) -> bool {
        self.attrs.has_key()
    }

    /// Key used by display serialization.
    pub(crate) fn display_key(&self) -> &str {
        self.attrs.data.as_deref().unwrap_or(&self.name)
    }
}

pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<StructModel> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Bind requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Bind can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let name = ident.unraw().to_string();
        let mut attrs = parse_field_attrs(&field.attrs)?;
        if !attrs.has_key() && !attrs.skip {
            attrs.data = serde_field_rename(&field.attrs)?.or_else(|| {
                struct_attrs
                    .rename_all
                    .map(|rule| rule.apply(&name))
            });
        }
        validate(&attrs, field)?;
        fields.push(FieldModel {
            ident,
            name,
            attrs,
            unsupported: unsupported_kind(&field.ty),
        });
    }

    Ok(StructModel {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        crate_path: struct_attrs.crate_path,
        fields,
    })
}

fn validate(attrs: &FieldAttrs, field: &syn::Field) -> syn::Result<()> {
    if attrs.skip && (attrs.has_key() || attrs.required) {
        return Err(syn::Error::new_spanned(
            field,
            "`skip` cannot be combined with other `bind` attributes",
        ));
    }
    if attrs.required && !attrs.has_key() {
        return Err(syn::Error::new_spanned(
            field,
            "`required` needs a key from `bind`, `serde(rename)` or `rename_all`",
        ));
    }
    Ok(())
}

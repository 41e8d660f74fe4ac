//! Serde attribute parsing helpers.
//!
//! Structs that also derive serde often already spell their wire names with
//! `#[serde(rename = "...")]` or `#[serde(rename_all = "...")]`. The derive
//! reuses those names as data keys for fields that carry no `bind` key, so
//! the display form and the nested-JSON keys line up with serde's.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::{Attribute, LitStr, Token};

/// Casing rules accepted by `rename_all`, with serde's spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

const RULES: [(&str, SerdeRenameAll); 8] = [
    ("lowercase", SerdeRenameAll::Lower),
    ("UPPERCASE", SerdeRenameAll::Upper),
    ("PascalCase", SerdeRenameAll::Pascal),
    ("camelCase", SerdeRenameAll::Camel),
    ("snake_case", SerdeRenameAll::Snake),
    ("SCREAMING_SNAKE_CASE", SerdeRenameAll::ScreamingSnake),
    ("kebab-case", SerdeRenameAll::Kebab),
    ("SCREAMING-KEBAB-CASE", SerdeRenameAll::ScreamingKebab),
];

impl SerdeRenameAll {
    pub(crate) fn parse(value: &LitStr) -> syn::Result<Self> {
        let name = value.value();
        RULES
            .iter()
            .find_map(|(spelling, rule)| (*spelling == name).then_some(*rule))
            .ok_or_else(|| {
                let expected: Vec<_> = RULES.iter().map(|(spelling, _)| *spelling).collect();
                syn::Error::new(
                    value.span(),
                    format!(
                        "unsupported rename_all value '{name}'; expected one of {}",
                        expected.join(", ")
                    ),
                )
            })
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Parse `#[serde(rename_all = "...")]` from struct attributes.
///
/// The split `rename_all(serialize = "...")` form is read through its
/// `serialize` rule.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut out = None;
    for_serde_entry(attrs, "rename_all", |value| {
        out = Some(SerdeRenameAll::parse(value)?);
        Ok(())
    })?;
    Ok(out)
}

/// Parse `#[serde(rename = "...")]` (or `rename(serialize = "...")`) from
/// field attributes.
pub(crate) fn serde_field_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut out = None;
    for_serde_entry(attrs, "rename", |value| {
        out = Some(value.value());
        Ok(())
    })?;
    Ok(out)
}

fn for_serde_entry<F>(attrs: &[Attribute], key: &str, mut apply: F) -> syn::Result<()>
where
    F: FnMut(&LitStr) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident(key) {
                return super::discard_unknown(&meta);
            }
            if meta.input.peek(Token![=]) {
                return apply(&meta.value()?.parse::<LitStr>()?);
            }
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|nested| {
                    if nested.path.is_ident("serialize") {
                        apply(&nested.value()?.parse::<LitStr>()?)
                    } else {
                        super::discard_unknown(&nested)
                    }
                })?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

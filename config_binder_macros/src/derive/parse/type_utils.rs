//! Type introspection helpers.
//!
//! The derive classifies field types syntactically. Types that can never
//! take part in binding are recognised here so the generated code can report
//! them at bind time instead of failing to compile; every other type must
//! implement `config_binder::Field`.

use syn::{GenericArgument, PathArguments, Type};

/// Returns a description of `ty` when the binder can never populate it.
pub(crate) fn unsupported_kind(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::Paren(inner) => unsupported_kind(&inner.elem),
        Type::Group(inner) => unsupported_kind(&inner.elem),
        Type::Tuple(tuple) if tuple.elems.is_empty() => Some("unit"),
        Type::Tuple(_) => Some("tuple"),
        Type::Reference(_) => Some("reference"),
        Type::Ptr(_) => Some("raw pointer"),
        Type::Slice(_) => Some("slice"),
        Type::BareFn(_) => Some("function pointer"),
        Type::TraitObject(_) => Some("trait object"),
        Type::ImplTrait(_) => Some("impl trait"),
        Type::Never(_) => Some("never"),
        Type::Path(path) if path.qself.is_none() => path_kind(path),
        Type::Array(_) | Type::Path(_) => None,
        _ => Some("unrecognised type"),
    }
}

fn path_kind(path: &syn::TypePath) -> Option<&'static str> {
    let last = path.path.segments.last()?;
    if last.ident == "char" && last.arguments.is_none() {
        return Some("char");
    }
    if last.ident != "Option" {
        return None;
    }
    match first_type_argument(&last.arguments) {
        Some(inner) if is_pointer_or_deferred(inner) => None,
        _ => Some("option (use Option<Box<T>> or a deferred input)"),
    }
}

fn is_pointer_or_deferred(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "Box" || segment.ident == "Deferred")
}

/// Extract the first type argument from a `PathArguments` container.
fn first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    match angle_args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

//! Code generation for `#[derive(Bind)]`.
//!
//! Emits two impls: `Bind`, which lends out one `FieldSlot` per tagged field
//! and builds the display map, and `Field`, which lets the struct nest inside
//! other bound structs, pointers and sequences.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldModel, StructModel};

pub(crate) fn bind_impl(model: &StructModel, krate: &TokenStream) -> TokenStream {
    let ident = &model.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = model.generics.split_for_impl();

    let borrowed = model
        .fields
        .iter()
        .filter(|field| field.is_tagged() && field.unsupported.is_none())
        .map(|field| &field.ident);
    let slots = model
        .fields
        .iter()
        .filter(|field| field.is_tagged())
        .map(|field| slot_tokens(field, krate));

    let displayed: Vec<&FieldModel> = model
        .fields
        .iter()
        .filter(|field| !field.attrs.skip && field.unsupported.is_none())
        .collect();
    let count = displayed.len();
    let display_keys = displayed.iter().map(|field| field.display_key());
    let display_idents = displayed.iter().map(|field| &field.ident);

    quote! {
        impl #impl_generics #krate::Bind for #ident #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn fields(&mut self) -> ::std::vec::Vec<#krate::FieldSlot<'_>> {
                let Self { #( #borrowed, )* .. } = self;
                ::std::vec![ #( #slots ),* ]
            }

            fn display_map(
                &self,
            ) -> #krate::BindResult<
                #krate::__private::Map<::std::string::String, #krate::__private::Value>,
            > {
                let entries: [(&'static str, #krate::BindResult<#krate::__private::Value>); #count] = [
                    #( (#display_keys, #krate::Field::display_value(&self.#display_idents)) ),*
                ];
                ::std::iter::IntoIterator::into_iter(entries)
                    .map(|(key, value)| value.map(|shown| (::std::string::String::from(key), shown)))
                    .collect()
            }
        }

        impl #impl_generics #krate::Field for #ident #ty_generics #where_clause {
            fn target(&mut self) -> #krate::Target<'_> {
                #krate::Target::Struct(self)
            }

            fn display_value(&self) -> #krate::BindResult<#krate::__private::Value> {
                #krate::display_value(self)
            }
        }
    }
}

fn slot_tokens(field: &FieldModel, krate: &TokenStream) -> TokenStream {
    let descriptor = descriptor_tokens(field, krate);
    let target = match field.unsupported {
        Some(kind) => quote! { #krate::Target::Unsupported(#kind) },
        None => {
            let ident = &field.ident;
            quote! { #krate::Field::target(#ident) }
        }
    };
    quote! { #krate::FieldSlot::new(#descriptor, #target) }
}

fn descriptor_tokens(field: &FieldModel, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let config = field
        .attrs
        .config
        .as_ref()
        .map(|key| quote! { .with_config(#key) });
    let data = field.attrs.data.as_ref().map(|key| quote! { .with_data(#key) });
    let secret = field
        .attrs
        .secret
        .as_ref()
        .map(|key| quote! { .with_secret(#key) });
    let required = field.attrs.required.then(|| quote! { .required() });
    quote! {
        #krate::FieldDescriptor::new(#name) #config #data #secret #required
    }
}

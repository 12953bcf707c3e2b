//! Token emission for one validated configuration group.
//!
//! Each group becomes a `{GroupKey}Config` struct holding the group's store
//! and one working-default cell per property, with a read/write accessor
//! pair, descriptor construction, bulk map application, and reset logic.
//! Option properties persist their integer choice id; the generated
//! `*_from_id`/`*_to_id` fns are the only mapping between ids and variants.

use heck::ToUpperCamelCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::schema::{ConfigGroupSchema, PropertyDefault, PropertyDescriptor, ValueKind};

/// The generated implementation type name for a group key.
pub(crate) fn config_type_ident(group_key: &str) -> syn::Ident {
    format_ident!("{}Config", group_key.to_upper_camel_case())
}

fn default_field_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("{}_default", prop.name)
}

fn getter_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("{}", prop.name)
}

fn setter_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("set_{}", prop.name)
}

fn reset_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("reset_{}", prop.name)
}

fn override_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("override_{}_default", prop.name)
}

fn from_id_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("{}_from_id", prop.name)
}

fn to_id_ident(prop: &PropertyDescriptor) -> syn::Ident {
    format_ident!("{}_to_id", prop.name)
}

/// The type stored in a property's `DefaultCell`.
fn default_cell_type(prop: &PropertyDescriptor) -> TokenStream {
    match prop.value_kind {
        ValueKind::String => quote! { ::std::string::String },
        ValueKind::Bool => quote! { bool },
        ValueKind::I32 | ValueKind::Option => quote! { i32 },
        ValueKind::I64 => quote! { i64 },
        ValueKind::F32 => quote! { f32 },
        ValueKind::F64 => quote! { f64 },
    }
}

/// The literal seeding a property's `DefaultCell`.
fn default_literal(prop: &PropertyDescriptor) -> TokenStream {
    match &prop.default {
        PropertyDefault::Str(s) => quote! { ::std::string::String::from(#s) },
        PropertyDefault::Bool(b) => quote! { #b },
        PropertyDefault::I32(v) | PropertyDefault::ChoiceId(v) => quote! { #v },
        PropertyDefault::I64(v) => quote! { #v },
        PropertyDefault::F32(v) => quote! { #v },
        PropertyDefault::F64(v) => quote! { #v },
    }
}

/// Store accessor pair (`get_*`/`put_*`) for a property's kind.
fn store_methods(kind: ValueKind) -> (syn::Ident, syn::Ident) {
    let name = match kind {
        ValueKind::String => "string",
        ValueKind::Bool => "bool",
        ValueKind::I32 | ValueKind::Option => "i32",
        ValueKind::I64 => "i64",
        ValueKind::F32 => "f32",
        ValueKind::F64 => "f64",
    };
    (format_ident!("get_{name}"), format_ident!("put_{name}"))
}

/// `ConfigValue` coercion accessor for a property's kind.
fn coercion_ident(kind: ValueKind) -> syn::Ident {
    match kind {
        ValueKind::String => format_ident!("as_str"),
        ValueKind::Bool => format_ident!("as_bool"),
        ValueKind::I32 | ValueKind::Option => format_ident!("as_i32"),
        ValueKind::I64 => format_ident!("as_i64"),
        ValueKind::F32 => format_ident!("as_f32"),
        ValueKind::F64 => format_ident!("as_f64"),
    }
}

/// Whether a property carries everything its emitters need. Validated
/// schemas always satisfy this; descriptors constructed by hand may not.
fn emittable(prop: &PropertyDescriptor) -> bool {
    prop.value_kind != ValueKind::Option
        || (prop.option_type.is_some() && prop.flagged_default_choice().is_some())
}

fn struct_fields(props: &[&PropertyDescriptor]) -> Vec<TokenStream> {
    props
        .iter()
        .map(|prop| {
            let field = default_field_ident(prop);
            let ty = default_cell_type(prop);
            quote! { #field: ::prefkit::DefaultCell<#ty> }
        })
        .collect()
}

fn field_inits(props: &[&PropertyDescriptor]) -> Vec<TokenStream> {
    props
        .iter()
        .map(|prop| {
            let field = default_field_ident(prop);
            let default = default_literal(prop);
            quote! { #field: ::prefkit::DefaultCell::new(#default) }
        })
        .collect()
}

/// Read/write/reset/override accessors for one property.
fn accessor_fns(prop: &PropertyDescriptor) -> TokenStream {
    let key = &prop.storage_key;
    let field = default_field_ident(prop);
    let getter = getter_ident(prop);
    let setter = setter_ident(prop);
    let reset = reset_ident(prop);
    let override_fn = override_ident(prop);
    let (get, put) = store_methods(prop.value_kind);
    let cell_ty = default_cell_type(prop);

    match prop.value_kind {
        ValueKind::String => quote! {
            pub fn #getter(&self) -> ::std::string::String {
                self.store.#get(#key, &self.#field.get())
            }
            pub fn #setter(&self, value: &str) {
                self.store.#put(#key, value);
            }
            pub fn #reset(&self) {
                self.store.#put(#key, &self.#field.get());
            }
            pub fn #override_fn(&self, value: ::std::string::String) {
                self.#field.set(value);
            }
        },
        ValueKind::Option => option_accessor_fns(prop),
        _ => quote! {
            pub fn #getter(&self) -> #cell_ty {
                self.store.#get(#key, self.#field.get())
            }
            pub fn #setter(&self, value: #cell_ty) {
                self.store.#put(#key, value);
            }
            pub fn #reset(&self) {
                self.store.#put(#key, self.#field.get());
            }
            pub fn #override_fn(&self, value: #cell_ty) {
                self.#field.set(value);
            }
        },
    }
}

/// Option accessors: values persist as choice ids; reads resolve the stored
/// id, then the working default id, then the schema's flagged default.
fn option_accessor_fns(prop: &PropertyDescriptor) -> TokenStream {
    let key = &prop.storage_key;
    let field = default_field_ident(prop);
    let getter = getter_ident(prop);
    let setter = setter_ident(prop);
    let reset = reset_ident(prop);
    let override_fn = override_ident(prop);
    let from_id = from_id_ident(prop);
    let to_id = to_id_ident(prop);
    let Some(enum_ident) = prop.option_type.as_ref() else {
        return TokenStream::new();
    };
    let Some(flagged) = prop.choices.iter().find(|c| c.is_default).map(|c| &c.variant) else {
        return TokenStream::new();
    };
    // Non-selectable variants map to the configured default when written.
    let configured_id = match prop.default {
        PropertyDefault::ChoiceId(id) => id,
        _ => prop.flagged_default_choice().unwrap_or_default(),
    };

    let from_arms: Vec<TokenStream> = prop
        .choices
        .iter()
        .map(|choice| {
            let id = choice.choice_id;
            let variant = &choice.variant;
            quote! { #id => ::core::option::Option::Some(#variant), }
        })
        .collect();
    let to_arms: Vec<TokenStream> = prop
        .choices
        .iter()
        .map(|choice| {
            let id = choice.choice_id;
            let variant = &choice.variant;
            quote! { #variant => #id, }
        })
        .collect();

    quote! {
        pub fn #getter(&self) -> #enum_ident {
            let stored = self.store.get_i32(#key, self.#field.get());
            Self::#from_id(stored)
                .or_else(|| Self::#from_id(self.#field.get()))
                .unwrap_or(#flagged)
        }
        pub fn #setter(&self, value: #enum_ident) {
            self.store.put_i32(#key, Self::#to_id(value));
        }
        pub fn #reset(&self) {
            self.store.put_i32(#key, self.#field.get());
        }
        pub fn #override_fn(&self, default_id: i32) {
            self.#field.set(default_id);
        }
        fn #from_id(id: i32) -> ::core::option::Option<#enum_ident> {
            match id {
                #( #from_arms )*
                _ => ::core::option::Option::None,
            }
        }
        fn #to_id(value: #enum_ident) -> i32 {
            match value {
                #( #to_arms )*
                #[allow(unreachable_patterns)]
                _ => #configured_id,
            }
        }
    }
}

/// One descriptor construction block per property.
fn descriptor_blocks(props: &[&PropertyDescriptor]) -> Vec<TokenStream> {
    props
        .iter()
        .map(|prop| {
            let key = &prop.storage_key;
            let description = &prop.description;
            let field = default_field_ident(prop);
            let getter = getter_ident(prop);
            let setter = setter_ident(prop);
            let reset = reset_ident(prop);

            if prop.value_kind == ValueKind::Option {
                let from_id = from_id_ident(prop);
                let to_id = to_id_ident(prop);
                let choice_items: Vec<TokenStream> = prop
                    .choices
                    .iter()
                    .map(|choice| {
                        let id = choice.choice_id;
                        let text = &choice.description;
                        quote! {
                            ::prefkit::ChoiceItem {
                                id: #id,
                                description: ::std::string::String::from(#text),
                            }
                        }
                    })
                    .collect();
                quote! {
                    {
                        let current = ::std::sync::Arc::clone(self);
                        let select = ::std::sync::Arc::clone(self);
                        let reset = ::std::sync::Arc::clone(self);
                        items.push(::prefkit::ConfigItemDescriptor::Option(
                            ::prefkit::OptionItem::new(
                                #key,
                                #description,
                                vec![ #( #choice_items ),* ],
                                self.#field.get(),
                                Box::new(move || Self::#to_id(current.#getter())),
                                Box::new(move |id| {
                                    if let Some(value) = Self::#from_id(id) {
                                        select.#setter(value);
                                    }
                                }),
                                Box::new(move || reset.#reset()),
                            ),
                        ));
                    }
                }
            } else {
                let coerce = coercion_ident(prop.value_kind);
                quote! {
                    {
                        let current = ::std::sync::Arc::clone(self);
                        let update = ::std::sync::Arc::clone(self);
                        let reset = ::std::sync::Arc::clone(self);
                        items.push(::prefkit::ConfigItemDescriptor::Standard(
                            ::prefkit::StandardItem::new(
                                #key,
                                #description,
                                ::prefkit::ConfigValue::from(self.#field.get()),
                                Box::new(move || ::prefkit::ConfigValue::from(current.#getter())),
                                Box::new(move |value| {
                                    if let Some(v) = value.#coerce() {
                                        update.#setter(v);
                                    }
                                }),
                                Box::new(move || reset.#reset()),
                            ),
                        ));
                    }
                }
            }
        })
        .collect()
}

/// One `apply_from_map` arm per property.
fn apply_arms(props: &[&PropertyDescriptor]) -> Vec<TokenStream> {
    props
        .iter()
        .map(|prop| {
            let key = &prop.storage_key;
            let setter = setter_ident(prop);
            if prop.value_kind == ValueKind::Option {
                let from_id = from_id_ident(prop);
                quote! {
                    if let Some(value) = values.get(#key) {
                        if let Some(id) = value.as_choice_id() {
                            if let Some(choice) = Self::#from_id(id) {
                                self.#setter(choice);
                            }
                        }
                    }
                }
            } else {
                let coerce = coercion_ident(prop.value_kind);
                quote! {
                    if let Some(value) = values.get(#key) {
                        if let Some(v) = value.#coerce() {
                            self.#setter(v);
                        }
                    }
                }
            }
        })
        .collect()
}

/// Emits the full implementation for one group.
pub(crate) fn emit_group(group: &ConfigGroupSchema) -> TokenStream {
    let ty = config_type_ident(&group.group_key);
    let group_key = &group.group_key;
    let props: Vec<&PropertyDescriptor> = group.properties.iter().filter(|p| emittable(p)).collect();
    let fields = struct_fields(&props);
    let inits = field_inits(&props);
    let accessors: Vec<TokenStream> = props.iter().map(|prop| accessor_fns(prop)).collect();
    let descriptors = descriptor_blocks(&props);
    let apply = apply_arms(&props);
    let resets: Vec<TokenStream> = props
        .iter()
        .map(|prop| {
            let reset = reset_ident(prop);
            quote! { self.#reset(); }
        })
        .collect();

    quote! {
        pub struct #ty {
            store: ::std::sync::Arc<dyn ::prefkit::ConfigStore>,
            #( #fields, )*
        }

        impl #ty {
            pub fn new(store: ::std::sync::Arc<dyn ::prefkit::ConfigStore>) -> Self {
                Self {
                    store,
                    #( #inits, )*
                }
            }

            pub fn shared() -> ::std::sync::Arc<Self> {
                ::prefkit::registry::group_instance(#group_key, Self::new)
            }

            #( #accessors )*

            pub fn descriptors(
                self: &::std::sync::Arc<Self>,
            ) -> ::std::vec::Vec<::prefkit::ConfigItemDescriptor> {
                let mut items: ::std::vec::Vec<::prefkit::ConfigItemDescriptor> =
                    ::std::vec::Vec::new();
                #( #descriptors )*
                items
            }

            pub fn apply_from_map(
                &self,
                values: &::std::collections::HashMap<::std::string::String, ::prefkit::ConfigValue>,
            ) {
                #( #apply )*
            }

            pub fn reset_to_defaults(&self) {
                #( #resets )*
            }
        }
    }
}

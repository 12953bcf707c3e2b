//! Cleaned re-emission of schema declarations.
//!
//! Marker attributes only exist for the pipeline; emitted declarations must
//! compile on their own, so markers are stripped and option enums gain the
//! derives the generated accessors rely on. Schema enums should not declare
//! their own derives; the generator owns that surface.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{ItemEnum, ItemTrait, TraitItem};

use crate::schema::ValueKind;

fn is_marker(path: &syn::Path) -> bool {
    let markers = [
        "config_group",
        "config_options",
        "choice",
        ValueKind::String.marker(),
        ValueKind::Bool.marker(),
        ValueKind::I32.marker(),
        ValueKind::I64.marker(),
        ValueKind::F32.marker(),
        ValueKind::F64.marker(),
        ValueKind::Option.marker(),
    ];
    markers.iter().any(|m| path.is_ident(m))
}

fn strip_markers(attrs: &mut Vec<syn::Attribute>) {
    attrs.retain(|a| !is_marker(a.path()));
}

/// Re-emits an option enum without markers, deriving what generated
/// accessors need (`Copy` for by-value mapping, `PartialEq` for matching).
pub(crate) fn clean_enum(item: &ItemEnum) -> TokenStream {
    let mut cleaned = item.clone();
    strip_markers(&mut cleaned.attrs);
    for variant in &mut cleaned.variants {
        strip_markers(&mut variant.attrs);
    }
    quote! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #cleaned
    }
}

/// Re-emits a group trait without markers: the signature-only stub surface
/// of the shared declarations pass.
pub(crate) fn clean_trait(decl: &ItemTrait) -> TokenStream {
    let mut cleaned = decl.clone();
    strip_markers(&mut cleaned.attrs);
    for member in &mut cleaned.items {
        if let TraitItem::Fn(method) = member {
            strip_markers(&mut method.attrs);
        }
    }
    quote! { #cleaned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn enum_markers_are_stripped_and_derives_added() {
        let item: ItemEnum = parse_quote! {
            #[config_options]
            pub enum LogLevel {
                #[choice(id = 0, default)]
                Quiet,
                #[choice(id = 1)]
                Verbose,
            }
        };
        let code = clean_enum(&item).to_string();
        assert!(!code.contains("config_options"));
        assert!(!code.contains("choice"));
        assert!(code.contains("derive"));
        assert!(code.contains("Quiet"));
    }

    #[test]
    fn trait_markers_are_stripped_but_docs_survive() {
        let decl: ItemTrait = parse_quote! {
            #[config_group(name = "network")]
            pub trait NetworkSettings {
                /// Request timeout.
                #[string_prop(default = "30s")]
                fn timeout(&self) -> String;
            }
        };
        let code = clean_trait(&decl).to_string();
        assert!(!code.contains("config_group"));
        assert!(!code.contains("string_prop"));
        assert!(code.contains("fn timeout"));
        assert!(code.contains("Request timeout"));
    }
}

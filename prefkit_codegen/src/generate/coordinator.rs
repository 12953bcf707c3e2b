//! Aggregate emission across every group in the pass.
//!
//! Emits the `config_registry` module: collect every group's descriptors,
//! route a nested remote update to the matching group, and reset every group
//! in schema order. Unknown group keys in an update are ignored.

use proc_macro2::TokenStream;
use quote::quote;

use crate::schema::ConfigGroupSchema;

use super::group::config_type_ident;

/// Emits the cross-group helper module over the groups included in this pass.
pub(crate) fn emit_registry_module(groups: &[&ConfigGroupSchema]) -> TokenStream {
    let collect_entries: Vec<TokenStream> = groups
        .iter()
        .map(|group| {
            let key = &group.group_key;
            let ty = config_type_ident(&group.group_key);
            quote! {
                (
                    ::std::string::String::from(#key),
                    super::#ty::shared().descriptors(),
                )
            }
        })
        .collect();

    let apply_entries: Vec<TokenStream> = groups
        .iter()
        .map(|group| {
            let key = &group.group_key;
            let ty = config_type_ident(&group.group_key);
            quote! {
                if let Some(values) = update.get(#key) {
                    super::#ty::shared().apply_from_map(values);
                }
            }
        })
        .collect();

    let reset_entries: Vec<TokenStream> = groups
        .iter()
        .map(|group| {
            let ty = config_type_ident(&group.group_key);
            quote! { super::#ty::shared().reset_to_defaults(); }
        })
        .collect();

    quote! {
        pub mod config_registry {
            /// Descriptor lists for every generated group, in schema order.
            pub fn collect_all_descriptors() -> ::std::vec::Vec<(
                ::std::string::String,
                ::std::vec::Vec<::prefkit::ConfigItemDescriptor>,
            )> {
                vec![ #( #collect_entries ),* ]
            }

            /// Applies a nested `group key -> property map` update. Group
            /// keys with no generated group are ignored.
            pub fn apply_remote_update(
                update: &::std::collections::HashMap<
                    ::std::string::String,
                    ::std::collections::HashMap<::std::string::String, ::prefkit::ConfigValue>,
                >,
            ) {
                #( #apply_entries )*
            }

            /// Resets every group to its working defaults, in schema order.
            pub fn reset_all_to_defaults() {
                #( #reset_entries )*
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConfigGroupSchema;
    use syn::parse_quote;

    fn group(key: &str) -> ConfigGroupSchema {
        ConfigGroupSchema {
            name: key.to_owned(),
            group_key: key.to_owned(),
            target: String::new(),
            properties: Vec::new(),
            decl: parse_quote! { trait Placeholder {} },
            location: None,
        }
    }

    #[test]
    fn registry_module_covers_every_group_in_order() {
        let net = group("network");
        let audio = group("audio");
        let code = emit_registry_module(&[&net, &audio]).to_string();
        assert!(code.contains("pub mod config_registry"));
        assert!(code.contains("collect_all_descriptors"));
        assert!(code.contains("apply_remote_update"));
        assert!(code.contains("reset_all_to_defaults"));
        let network_pos = code.find("NetworkConfig").expect("network entry");
        let audio_pos = code.find("AudioConfig").expect("audio entry");
        assert!(network_pos < audio_pos);
    }

    #[test]
    fn empty_pass_still_emits_the_module() {
        let code = emit_registry_module(&[]).to_string();
        assert!(code.contains("config_registry"));
    }
}

//! Emission orchestration across the validated schema set.
//!
//! Groups are emitted independently: a panic while emitting one group's
//! artifacts is caught, logged with group context, and reported as a
//! diagnostic so the remaining groups still generate.

pub(crate) mod coordinator;
pub(crate) mod declarations;
pub(crate) mod group;

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemEnum;

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::schema::{ConfigGroupSchema, ValueKind};
use crate::target::EmissionPass;

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown panic")
    }
}

/// Option enums referenced by the included groups, in first-use order.
fn referenced_enums<'a>(
    groups: &[&ConfigGroupSchema],
    option_enums: &'a HashMap<String, ItemEnum>,
) -> Vec<&'a ItemEnum> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for group in groups {
        for prop in &group.properties {
            if prop.value_kind != ValueKind::Option {
                continue;
            }
            if let Some(ident) = &prop.option_type {
                let name = ident.to_string();
                if seen.insert(name.clone()) {
                    if let Some(item) = option_enums.get(&name) {
                        out.push(item);
                    }
                }
            }
        }
    }
    out
}

/// Emits everything the selected pass owns for the validated groups.
///
/// `ordered_enums` carries the marked option enums in declaration order;
/// `option_enums` is the same set keyed by name for lookups.
pub(crate) fn emit_all(
    groups: &[ConfigGroupSchema],
    ordered_enums: &[ItemEnum],
    option_enums: &HashMap<String, ItemEnum>,
    pass: &EmissionPass,
    diagnostics: &mut Diagnostics,
) -> TokenStream {
    if !pass.emits_implementations() {
        let enums: Vec<TokenStream> = ordered_enums
            .iter()
            .map(declarations::clean_enum)
            .collect();
        let traits: Vec<TokenStream> = groups
            .iter()
            .map(|g| declarations::clean_trait(&g.decl))
            .collect();
        return quote! {
            #( #enums )*
            #( #traits )*
        };
    }

    let included: Vec<&ConfigGroupSchema> =
        groups.iter().filter(|g| pass.includes_group(g)).collect();

    let enums: Vec<TokenStream> = referenced_enums(&included, option_enums)
        .into_iter()
        .map(declarations::clean_enum)
        .collect();

    let mut impls = Vec::new();
    let mut emitted: Vec<&ConfigGroupSchema> = Vec::new();
    for group in &included {
        match panic::catch_unwind(AssertUnwindSafe(|| group::emit_group(group))) {
            Ok(tokens) => {
                impls.push(tokens);
                emitted.push(group);
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(
                    group_key = %group.group_key,
                    error = %message,
                    "emission failed; skipping group"
                );
                diagnostics.error_at(
                    DiagnosticCode::EmissionFailed,
                    format!("failed to emit group '{}': {message}", group.group_key),
                    group.location,
                );
            }
        }
    }

    let registry = coordinator::emit_registry_module(&emitted);

    quote! {
        #( #enums )*
        #( #impls )*
        #registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SOURCE: &str = r#"
        #[config_group(name = "network")]
        pub trait NetworkSettings {
            #[string_prop(key = "timeout", default = "30s")]
            fn timeout(&self) -> String;
            #[option_prop]
            fn log_level(&self) -> LogLevel;
        }

        #[config_group(name = "audio", target = "device")]
        pub trait AudioSettings {
            #[bool_prop(default = true)]
            fn enabled(&self) -> bool;
        }

        #[config_options]
        pub enum LogLevel {
            #[choice(id = 0, default)]
            Quiet,
            #[choice(id = 1)]
            Verbose,
        }
    "#;

    fn parsed() -> (Vec<ConfigGroupSchema>, Vec<ItemEnum>, HashMap<String, ItemEnum>) {
        let file = syn::parse_file(SOURCE).expect("schema source");
        let mut diagnostics = Diagnostics::new();
        let groups = parse::parse_schema(&file, &mut diagnostics);
        assert!(!diagnostics.has_errors());
        (
            groups,
            parse::marked_enums_ordered(&file),
            parse::collect_enums(&file),
        )
    }

    #[test]
    fn combined_pass_emits_enums_impls_and_registry() {
        let (groups, ordered, enums) = parsed();
        let mut diagnostics = Diagnostics::new();
        let code = emit_all(&groups, &ordered, &enums, &EmissionPass::Combined, &mut diagnostics)
            .to_string();
        assert!(code.contains("enum LogLevel"));
        assert!(code.contains("struct NetworkConfig"));
        assert!(code.contains("struct AudioConfig"));
        assert!(code.contains("config_registry"));
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn shared_pass_emits_stub_declarations_only() {
        let (groups, ordered, enums) = parsed();
        let mut diagnostics = Diagnostics::new();
        let code = emit_all(
            &groups,
            &ordered,
            &enums,
            &EmissionPass::SharedDeclarations,
            &mut diagnostics,
        )
        .to_string();
        assert!(code.contains("trait NetworkSettings"));
        assert!(code.contains("enum LogLevel"));
        assert!(!code.contains("struct NetworkConfig"));
        assert!(!code.contains("config_registry"));
    }

    #[test]
    fn target_pass_excludes_groups_owned_elsewhere() {
        let (groups, ordered, enums) = parsed();
        let mut diagnostics = Diagnostics::new();
        let pass = EmissionPass::TargetImplementations {
            target: "host".into(),
        };
        let code = emit_all(&groups, &ordered, &enums, &pass, &mut diagnostics).to_string();
        // `network` has no owner, `audio` belongs to the device target.
        assert!(code.contains("struct NetworkConfig"));
        assert!(!code.contains("struct AudioConfig"));
    }
}

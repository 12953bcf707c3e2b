//! Schema source scanning.
//!
//! A schema file is plain Rust: `#[config_group]` traits describe groups and
//! `#[config_options]` enums describe closed option hierarchies. Scanning
//! collects the enum table first so property parsing can resolve option
//! return types regardless of declaration order.

pub(crate) mod attrs;
pub(crate) mod group;
pub(crate) mod options;
pub(crate) mod property;

use std::collections::HashMap;

use syn::Item;

use crate::diagnostics::Diagnostics;
use crate::schema::ConfigGroupSchema;

pub use group::is_valid_group_key;

/// Every enum declared in the schema set, keyed by name.
///
/// Unmarked enums are included so a missing `#[config_options]` marker can be
/// reported distinctly from a type that is not an enum at all.
pub(crate) fn collect_enums(file: &syn::File) -> HashMap<String, syn::ItemEnum> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Enum(e) => Some((e.ident.to_string(), e.clone())),
            _ => None,
        })
        .collect()
}

/// Marked option enums in declaration order, for deterministic re-emission.
pub(crate) fn marked_enums_ordered(file: &syn::File) -> Vec<syn::ItemEnum> {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Enum(e) if options::has_options_marker(e) => Some(e.clone()),
            _ => None,
        })
        .collect()
}

fn item_attrs(item: &Item) -> &[syn::Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

fn has_group_marker(item: &Item) -> bool {
    item_attrs(item).iter().any(|a| a.path().is_ident("config_group"))
}

/// Parses every marked group in `file`, in declaration order.
///
/// Failed groups are dropped with diagnostics; the returned vector holds the
/// survivors, unvalidated.
pub(crate) fn parse_schema(
    file: &syn::File,
    diagnostics: &mut Diagnostics,
) -> Vec<ConfigGroupSchema> {
    let option_enums = collect_enums(file);
    file.items
        .iter()
        .filter(|item| has_group_marker(item))
        .filter_map(|item| group::parse_group(item, &option_enums, diagnostics))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCode;

    const SOURCE: &str = r#"
        #[config_group(name = "network")]
        pub trait NetworkSettings {
            #[string_prop(key = "timeout", default = "30s")]
            fn timeout(&self) -> String;
            #[option_prop]
            fn log_level(&self) -> LogLevel;
        }

        #[config_group]
        pub trait Playback {
            #[bool_prop(default = false)]
            fn shuffle(&self) -> bool;
        }

        #[config_options]
        pub enum LogLevel {
            #[choice(id = 0, description = "Errors only", default)]
            Quiet,
            #[choice(id = 1, description = "Everything")]
            Verbose,
        }
    "#;

    #[test]
    fn groups_parse_in_declaration_order() {
        let file = syn::parse_file(SOURCE).expect("schema source");
        let mut diagnostics = Diagnostics::new();
        let groups = parse_schema(&file, &mut diagnostics);
        assert!(!diagnostics.has_errors());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_key, "network");
        assert_eq!(groups[1].group_key, "Playback");
        assert_eq!(groups[0].properties.len(), 2);
    }

    #[test]
    fn enums_are_resolved_across_declaration_order() {
        // LogLevel is declared after the group that references it.
        let file = syn::parse_file(SOURCE).expect("schema source");
        let enums = collect_enums(&file);
        assert!(enums.contains_key("LogLevel"));
    }

    #[test]
    fn marked_fn_reports_and_is_skipped() {
        let source = r#"
            #[config_group(name = "helper")]
            pub fn helper() {}
        "#;
        let file = syn::parse_file(source).expect("schema source");
        let mut diagnostics = Diagnostics::new();
        let groups = parse_schema(&file, &mut diagnostics);
        assert!(groups.is_empty());
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::GroupMustBeTrait);
    }

    #[test]
    fn marked_struct_reports_and_is_skipped() {
        let source = r"
            #[config_group]
            pub struct NotATrait {
                pub value: i32,
            }
        ";
        let file = syn::parse_file(source).expect("schema source");
        let mut diagnostics = Diagnostics::new();
        let groups = parse_schema(&file, &mut diagnostics);
        assert!(groups.is_empty());
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::GroupMustBeTrait);
    }
}

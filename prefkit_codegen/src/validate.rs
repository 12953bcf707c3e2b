//! Cross-group integrity validation.
//!
//! Runs once over the whole parsed schema set before any emission. The pass
//! never rejects the set outright: duplicate groups and duplicate keys are
//! dropped first-wins and everything else proceeds.

use std::collections::HashSet;

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::schema::ConfigGroupSchema;

/// Enforces group-key uniqueness across groups and storage-key uniqueness
/// within each group. Keys reused across *different* groups are allowed.
///
/// Distinct keys that map to the same generated type name (`net_work` and
/// `NetWork` both become `NetWorkConfig`) are rejected the same way, since
/// both implementations would land in one module.
pub(crate) fn validate_groups(
    groups: Vec<ConfigGroupSchema>,
    diagnostics: &mut Diagnostics,
) -> Vec<ConfigGroupSchema> {
    let mut seen_group_keys = HashSet::new();
    let mut seen_type_names = HashSet::new();
    let mut kept = Vec::with_capacity(groups.len());

    for mut group in groups {
        if !seen_group_keys.insert(group.group_key.clone()) {
            diagnostics.error_at(
                DiagnosticCode::DuplicateGroupKey,
                format!(
                    "group '{}' reuses group key '{}'; the first declaration wins",
                    group.name, group.group_key
                ),
                group.location,
            );
            continue;
        }
        let type_name = crate::generate::group::config_type_ident(&group.group_key).to_string();
        if !seen_type_names.insert(type_name.clone()) {
            diagnostics.error_at(
                DiagnosticCode::GroupTypeNameCollision,
                format!(
                    "group key '{}' generates type '{type_name}', already emitted for an earlier group",
                    group.group_key
                ),
                group.location,
            );
            continue;
        }
        dedupe_properties(&mut group, diagnostics);
        kept.push(group);
    }
    kept
}

fn dedupe_properties(group: &mut ConfigGroupSchema, diagnostics: &mut Diagnostics) {
    let mut seen: Vec<(String, String)> = Vec::new();
    let group_key = group.group_key.clone();
    group.properties.retain(|prop| {
        if let Some((_, original)) = seen.iter().find(|(key, _)| *key == prop.storage_key) {
            diagnostics.error_at(
                DiagnosticCode::DuplicateKeyInGroup,
                format!(
                    "property '{}' in group '{group_key}' reuses key '{}' already taken by '{original}'",
                    prop.name, prop.storage_key
                ),
                prop.location,
            );
            false
        } else {
            seen.push((prop.storage_key.clone(), prop.name.clone()));
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PropertyDefault, PropertyDescriptor, ValueKind};
    use syn::parse_quote;

    fn group(key: &str, props: &[(&str, &str)]) -> ConfigGroupSchema {
        ConfigGroupSchema {
            name: key.to_owned(),
            group_key: key.to_owned(),
            target: String::new(),
            properties: props
                .iter()
                .map(|(name, storage_key)| PropertyDescriptor {
                    name: (*name).to_owned(),
                    storage_key: (*storage_key).to_owned(),
                    value_kind: ValueKind::I32,
                    description: String::new(),
                    default: PropertyDefault::I32(0),
                    choices: Vec::new(),
                    option_type: None,
                    location: None,
                })
                .collect(),
            decl: parse_quote! { trait Placeholder {} },
            location: None,
        }
    }

    #[test]
    fn duplicate_group_keys_keep_first_and_report_rest() {
        let mut diagnostics = Diagnostics::new();
        let kept = validate_groups(
            vec![
                group("net", &[("a", "a")]),
                group("net", &[("b", "b")]),
                group("audio", &[("c", "c")]),
            ],
            &mut diagnostics,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].properties[0].name, "a");
        assert_eq!(kept[1].group_key, "audio");
        let dupes: Vec<_> = diagnostics
            .entries()
            .iter()
            .filter(|d| d.code == DiagnosticCode::DuplicateGroupKey)
            .collect();
        assert_eq!(dupes.len(), 1);
    }

    #[test]
    fn duplicate_keys_within_a_group_keep_first_and_name_both_sides() {
        let mut diagnostics = Diagnostics::new();
        let kept = validate_groups(
            vec![group("net", &[("first", "timeout"), ("second", "timeout")])],
            &mut diagnostics,
        );
        assert_eq!(kept[0].properties.len(), 1);
        assert_eq!(kept[0].properties[0].name, "first");
        let message = &diagnostics.entries()[0].message;
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::DuplicateKeyInGroup);
        assert!(message.contains("second"));
        assert!(message.contains("first"));
    }

    #[test]
    fn colliding_generated_type_names_keep_first_and_report_rest() {
        let mut diagnostics = Diagnostics::new();
        let kept = validate_groups(
            vec![
                group("net_work", &[("a", "a")]),
                group("NetWork", &[("b", "b")]),
            ],
            &mut diagnostics,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].group_key, "net_work");
        assert_eq!(
            diagnostics.entries()[0].code,
            DiagnosticCode::GroupTypeNameCollision
        );
        assert!(diagnostics.entries()[0].message.contains("NetWorkConfig"));
    }

    #[test]
    fn same_key_across_groups_is_allowed() {
        let mut diagnostics = Diagnostics::new();
        let kept = validate_groups(
            vec![
                group("net", &[("timeout", "timeout")]),
                group("audio", &[("timeout", "timeout")]),
            ],
            &mut diagnostics,
        );
        assert_eq!(kept.len(), 2);
        assert!(diagnostics.entries().is_empty());
    }
}

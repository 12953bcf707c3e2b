//! Group parsing: one `#[config_group]` declaration to a [`ConfigGroupSchema`].

use std::collections::HashMap;

use syn::spanned::Spanned;
use syn::{Item, ItemEnum, TraitItem};

use crate::diagnostics::{DiagnosticCode, Diagnostics, SourceLocation};
use crate::schema::ConfigGroupSchema;

use super::attrs;
use super::property;

/// Arguments of the `#[config_group]` marker.
#[derive(Default)]
struct GroupArgs {
    name: Option<String>,
    target: Option<String>,
}

fn parse_group_args(attr: &syn::Attribute) -> syn::Result<GroupArgs> {
    let mut out = GroupArgs::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        return Ok(out);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            out.name = Some(attrs::lit_str(&meta, "name")?.value());
            Ok(())
        } else if meta.path.is_ident("target") {
            out.target = Some(attrs::lit_str(&meta, "target")?.value());
            Ok(())
        } else {
            attrs::discard_unknown(&meta)
        }
    })?;
    Ok(out)
}

/// Whether `key` is usable as a storage namespace and generated identifier:
/// letters, digits and underscores, no leading digit, no Rust keyword.
#[must_use]
pub fn is_valid_group_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    // Keyword rejection: `syn` refuses to parse reserved words as identifiers.
    syn::parse_str::<syn::Ident>(key).is_ok()
}

/// Parses one `#[config_group]`-annotated item.
///
/// Structural failures (non-trait declaration, invalid group key) drop the
/// whole group; property-level failures drop only the member.
pub(crate) fn parse_group(
    item: &Item,
    option_enums: &HashMap<String, ItemEnum>,
    diagnostics: &mut Diagnostics,
) -> Option<ConfigGroupSchema> {
    let Item::Trait(decl) = item else {
        diagnostics.error(
            DiagnosticCode::GroupMustBeTrait,
            "#[config_group] requires a contract-only declaration (a trait)",
            Some(item.span()),
        );
        return None;
    };

    let attr = decl
        .attrs
        .iter()
        .find(|a| a.path().is_ident("config_group"))?;
    let args = match parse_group_args(attr) {
        Ok(args) => args,
        Err(err) => {
            diagnostics.error(
                DiagnosticCode::MalformedAttribute,
                format!("invalid #[config_group] arguments on '{}': {err}", decl.ident),
                Some(attr.span()),
            );
            return None;
        }
    };

    let name = decl.ident.to_string();
    // Blank group name falls back to the declared type's own name.
    let group_key = match args.name {
        Some(ref key) if !key.trim().is_empty() => key.clone(),
        _ => name.clone(),
    };
    if !is_valid_group_key(&group_key) {
        diagnostics.error(
            DiagnosticCode::InvalidGroupKey,
            format!("group key '{group_key}' is not a valid identifier"),
            Some(attr.span()),
        );
        return None;
    }

    let mut properties = Vec::new();
    for member in &decl.items {
        if let TraitItem::Fn(method) = member {
            if let Some(prop) = property::parse_property(&name, method, option_enums, diagnostics) {
                properties.push(prop);
            }
        }
    }

    if properties.is_empty() {
        diagnostics.warning(
            DiagnosticCode::EmptyGroup,
            format!("group '{group_key}' has no properties; it generates an empty descriptor list"),
            Some(decl.span()),
        );
    }

    Some(ConfigGroupSchema {
        name,
        group_key,
        target: args.target.unwrap_or_default(),
        properties,
        decl: decl.clone(),
        location: Some(SourceLocation::from_span(decl.span())),
    })
}

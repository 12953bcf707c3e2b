//! Property parsing: one annotated trait method to one [`PropertyDescriptor`].
//!
//! The marker attribute name decides the value kind; a blank `key` argument
//! falls back to the method name before any uniqueness validation runs.
//! Failures drop only the property and are reported through the diagnostics
//! sink.

use std::collections::HashMap;

use syn::spanned::Spanned;
use syn::{ItemEnum, TraitItemFn};

use crate::diagnostics::{DiagnosticCode, Diagnostics, SourceLocation};
use crate::schema::{PropertyDefault, PropertyDescriptor, ValueKind};

use super::attrs;
use super::options;

const MARKERS: [ValueKind; 7] = [
    ValueKind::String,
    ValueKind::Bool,
    ValueKind::I32,
    ValueKind::I64,
    ValueKind::F32,
    ValueKind::F64,
    ValueKind::Option,
];

/// Raw arguments of one property marker.
#[derive(Default)]
struct PropArgs {
    key: Option<String>,
    description: Option<String>,
    default: Option<PropertyDefault>,
}

fn marker_kind(attr: &syn::Attribute) -> Option<ValueKind> {
    MARKERS.into_iter().find(|kind| attr.path().is_ident(kind.marker()))
}

fn parse_args(attr: &syn::Attribute, kind: ValueKind) -> syn::Result<PropArgs> {
    let mut out = PropArgs::default();
    if matches!(attr.meta, syn::Meta::Path(_)) {
        // Bare marker with no arguments, e.g. `#[option_prop]`.
        return Ok(out);
    }
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
            out.key = Some(attrs::lit_str(&meta, "key")?.value());
            Ok(())
        } else if meta.path.is_ident("description") {
            out.description = Some(attrs::lit_str(&meta, "description")?.value());
            Ok(())
        } else if meta.path.is_ident("default") {
            out.default = Some(parse_default(&meta, kind)?);
            Ok(())
        } else {
            attrs::discard_unknown(&meta)
        }
    })?;
    Ok(out)
}

fn parse_default(
    meta: &syn::meta::ParseNestedMeta<'_>,
    kind: ValueKind,
) -> syn::Result<PropertyDefault> {
    Ok(match kind {
        ValueKind::String => PropertyDefault::Str(attrs::lit_str(meta, "default")?.value()),
        ValueKind::Bool => PropertyDefault::Bool(attrs::lit_bool(meta, "default")?),
        ValueKind::I32 => PropertyDefault::I32(attrs::lit_i32(meta, "default")?),
        ValueKind::I64 => PropertyDefault::I64(attrs::lit_i64(meta, "default")?),
        #[allow(clippy::cast_possible_truncation)]
        ValueKind::F32 => PropertyDefault::F32(attrs::lit_f64(meta, "default")? as f32),
        ValueKind::F64 => PropertyDefault::F64(attrs::lit_f64(meta, "default")?),
        ValueKind::Option => PropertyDefault::ChoiceId(attrs::lit_i32(meta, "default")?),
    })
}

/// Flattens `///` doc comments into a single description line.
fn doc_description(method: &TraitItemFn) -> String {
    let mut lines = Vec::new();
    for attr in &method.attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta {
            if let syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s), ..
            }) = &nv.value
            {
                lines.push(s.value().trim().to_owned());
            }
        }
    }
    lines.join(" ")
}

fn return_type_ident(method: &TraitItemFn) -> Option<syn::Ident> {
    match &method.sig.output {
        syn::ReturnType::Type(_, ty) => match ty.as_ref() {
            syn::Type::Path(p) => p.path.segments.last().map(|s| s.ident.clone()),
            _ => None,
        },
        syn::ReturnType::Default => None,
    }
}

/// Parses one trait member into a property descriptor.
///
/// Returns `None` both for members without any property marker (they are not
/// schema properties) and for members whose marker fails validation; the two
/// cases are told apart by whether diagnostics were recorded.
pub(crate) fn parse_property(
    group_name: &str,
    method: &TraitItemFn,
    option_enums: &HashMap<String, ItemEnum>,
    diagnostics: &mut Diagnostics,
) -> Option<PropertyDescriptor> {
    let attr = method.attrs.iter().find(|a| marker_kind(a).is_some())?;
    let span = attr.span();
    let name = method.sig.ident.to_string();

    let Some(kind) = marker_kind(attr) else {
        // Closed dispatch; reaching this arm is a processor defect.
        diagnostics.error(
            DiagnosticCode::UnknownPropertyMarker,
            format!("unhandled property marker on '{group_name}.{name}'"),
            Some(span),
        );
        return None;
    };

    let args = match parse_args(attr, kind) {
        Ok(args) => args,
        Err(err) => {
            diagnostics.error(
                DiagnosticCode::MalformedAttribute,
                format!("invalid {} arguments on '{group_name}.{name}': {err}", kind.marker()),
                Some(span),
            );
            return None;
        }
    };

    // Convention over configuration: a blank or whitespace key means the
    // member's own name, substituted before any uniqueness validation.
    let storage_key = match args.key {
        Some(ref key) if !key.trim().is_empty() => key.clone(),
        _ => name.clone(),
    };
    let description = args
        .description
        .unwrap_or_else(|| doc_description(method));

    if kind == ValueKind::Option {
        return parse_option_property(
            group_name,
            method,
            option_enums,
            OptionContext {
                name,
                storage_key,
                description,
                configured_default: args.default,
                span,
            },
            diagnostics,
        );
    }

    let Some(default) = args.default else {
        diagnostics.error(
            DiagnosticCode::MissingDefaultValue,
            format!("property '{group_name}.{name}' is missing a default value"),
            Some(span),
        );
        return None;
    };

    Some(PropertyDescriptor {
        name,
        storage_key,
        value_kind: kind,
        description,
        default,
        choices: Vec::new(),
        option_type: None,
        location: Some(SourceLocation::from_span(span)),
    })
}

struct OptionContext {
    name: String,
    storage_key: String,
    description: String,
    configured_default: Option<PropertyDefault>,
    span: proc_macro2::Span,
}

fn parse_option_property(
    group_name: &str,
    method: &TraitItemFn,
    option_enums: &HashMap<String, ItemEnum>,
    ctx: OptionContext,
    diagnostics: &mut Diagnostics,
) -> Option<PropertyDescriptor> {
    let OptionContext {
        name,
        storage_key,
        description,
        configured_default,
        span,
    } = ctx;

    let Some(enum_item) = return_type_ident(method)
        .and_then(|ident| option_enums.get(&ident.to_string()))
    else {
        diagnostics.error(
            DiagnosticCode::OptionTypeNotEnum,
            format!(
                "option property '{group_name}.{name}' must return an enum declared in the schema"
            ),
            Some(span),
        );
        return None;
    };

    if !options::has_options_marker(enum_item) {
        diagnostics.error(
            DiagnosticCode::MissingOptionsMarker,
            format!(
                "enum '{}' used by '{group_name}.{name}' lacks #[config_options]",
                enum_item.ident
            ),
            Some(span),
        );
        return None;
    }

    let choices = options::parse_choices(enum_item, diagnostics)?;
    let default_id = match configured_default {
        Some(PropertyDefault::ChoiceId(id)) => id,
        _ => choices
            .iter()
            .find(|c| c.is_default)
            .map(|c| c.choice_id)
            .unwrap_or_default(),
    };

    Some(PropertyDescriptor {
        name,
        storage_key,
        value_kind: ValueKind::Option,
        description,
        default: PropertyDefault::ChoiceId(default_id),
        choices,
        option_type: Some(enum_item.ident.clone()),
        location: Some(SourceLocation::from_span(span)),
    })
}

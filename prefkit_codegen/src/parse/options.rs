//! Parsing of closed option hierarchies (`#[config_options]` enums).
//!
//! Each `#[choice]`-annotated variant becomes one selectable
//! [`OptionChoice`]; unannotated variants are silently non-selectable. The
//! hierarchy as a whole must provide at least one choice, exactly one
//! `default` flag, and unique ids.

use quote::quote;
use syn::ItemEnum;
use syn::spanned::Spanned;

use crate::diagnostics::{DiagnosticCode, Diagnostics};
use crate::schema::OptionChoice;

/// Whether `item` carries the `#[config_options]` marker.
pub(crate) fn has_options_marker(item: &ItemEnum) -> bool {
    item.attrs.iter().any(|a| a.path().is_ident("config_options"))
}

/// Arguments of one `#[choice(...)]` attribute.
#[derive(Default)]
struct ChoiceAttrs {
    id: Option<i32>,
    description: Option<String>,
    is_default: bool,
}

fn parse_choice_attr(attr: &syn::Attribute) -> syn::Result<ChoiceAttrs> {
    let mut out = ChoiceAttrs::default();
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("id") {
            out.id = Some(super::attrs::lit_i32(&meta, "id")?);
            Ok(())
        } else if meta.path.is_ident("description") {
            out.description = Some(super::attrs::lit_str(&meta, "description")?.value());
            Ok(())
        } else if meta.path.is_ident("default") {
            out.is_default = true;
            Ok(())
        } else {
            super::attrs::discard_unknown(&meta)
        }
    })?;
    Ok(out)
}

/// Parses the choice set of one option enum.
///
/// Returns `None` when the hierarchy violates a structural invariant; the
/// caller drops the owning property and generation proceeds elsewhere.
pub(crate) fn parse_choices(
    item: &ItemEnum,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<OptionChoice>> {
    let enum_ident = &item.ident;
    let mut choices = Vec::new();

    for variant in &item.variants {
        let Some(attr) = variant.attrs.iter().find(|a| a.path().is_ident("choice")) else {
            // Unannotated variants are simply not selectable.
            continue;
        };
        let parsed = match parse_choice_attr(attr) {
            Ok(parsed) => parsed,
            Err(err) => {
                diagnostics.error(
                    DiagnosticCode::MalformedAttribute,
                    format!("invalid #[choice] on '{enum_ident}::{}': {err}", variant.ident),
                    Some(attr.span()),
                );
                continue;
            }
        };
        let Some(id) = parsed.id else {
            diagnostics.error(
                DiagnosticCode::MalformedAttribute,
                format!("#[choice] on '{enum_ident}::{}' is missing an id", variant.ident),
                Some(attr.span()),
            );
            continue;
        };
        if !matches!(variant.fields, syn::Fields::Unit) {
            diagnostics.error(
                DiagnosticCode::MalformedAttribute,
                format!(
                    "choice variant '{enum_ident}::{}' must be a unit variant",
                    variant.ident
                ),
                Some(variant.span()),
            );
            continue;
        }
        let variant_ident = &variant.ident;
        choices.push(OptionChoice {
            choice_id: id,
            description: parsed.description.unwrap_or_default(),
            is_default: parsed.is_default,
            variant: quote! { #enum_ident::#variant_ident },
        });
    }

    validate_hierarchy(enum_ident, &choices, item, diagnostics).then_some(choices)
}

fn validate_hierarchy(
    enum_ident: &syn::Ident,
    choices: &[OptionChoice],
    item: &ItemEnum,
    diagnostics: &mut Diagnostics,
) -> bool {
    let span = Some(item.span());
    if choices.is_empty() {
        diagnostics.error(
            DiagnosticCode::NoChoices,
            format!("option enum '{enum_ident}' declares no #[choice] variants"),
            span,
        );
        return false;
    }

    let defaults = choices.iter().filter(|c| c.is_default).count();
    if defaults == 0 {
        diagnostics.error(
            DiagnosticCode::NoDefaultChoice,
            format!("option enum '{enum_ident}' has no choice flagged as default"),
            span,
        );
        return false;
    }
    if defaults > 1 {
        diagnostics.error(
            DiagnosticCode::MultipleDefaultChoices,
            format!("option enum '{enum_ident}' flags {defaults} choices as default"),
            span,
        );
        return false;
    }

    let mut seen = std::collections::HashSet::new();
    for choice in choices {
        if !seen.insert(choice.choice_id) {
            diagnostics.error(
                DiagnosticCode::DuplicateChoiceIds,
                format!(
                    "option enum '{enum_ident}' reuses choice id {}",
                    choice.choice_id
                ),
                span,
            );
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(item: ItemEnum) -> (Option<Vec<OptionChoice>>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let choices = parse_choices(&item, &mut diagnostics);
        (choices, diagnostics)
    }

    #[test]
    fn annotated_variants_become_choices_in_order() {
        let (choices, diagnostics) = parse(parse_quote! {
            #[config_options]
            enum LogLevel {
                #[choice(id = 0, description = "Errors only", default)]
                Quiet,
                #[choice(id = 1, description = "Everything")]
                Verbose,
                Internal,
            }
        });
        assert!(!diagnostics.has_errors());
        let choices = choices.expect("choices");
        assert_eq!(choices.len(), 2);
        assert_eq!(choices[0].choice_id, 0);
        assert!(choices[0].is_default);
        assert_eq!(choices[1].description, "Everything");
    }

    #[test]
    fn unannotated_only_enum_reports_no_choices() {
        let (choices, diagnostics) = parse(parse_quote! {
            enum Empty { A, B }
        });
        assert!(choices.is_none());
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::NoChoices);
    }

    #[test]
    fn missing_default_flag_is_an_error() {
        let (choices, diagnostics) = parse(parse_quote! {
            enum Levels {
                #[choice(id = 0)]
                A,
                #[choice(id = 1)]
                B,
            }
        });
        assert!(choices.is_none());
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::NoDefaultChoice);
    }

    #[test]
    fn multiple_default_flags_are_an_error() {
        let (choices, diagnostics) = parse(parse_quote! {
            enum Levels {
                #[choice(id = 0, default)]
                A,
                #[choice(id = 1, default)]
                B,
            }
        });
        assert!(choices.is_none());
        assert_eq!(
            diagnostics.entries()[0].code,
            DiagnosticCode::MultipleDefaultChoices
        );
    }

    #[test]
    fn duplicate_ids_are_an_error() {
        let (choices, diagnostics) = parse(parse_quote! {
            enum Levels {
                #[choice(id = 3, default)]
                A,
                #[choice(id = 3)]
                B,
            }
        });
        assert!(choices.is_none());
        assert_eq!(diagnostics.entries()[0].code, DiagnosticCode::DuplicateChoiceIds);
    }

    #[test]
    fn marker_detection_requires_config_options() {
        let marked: ItemEnum = parse_quote! {
            #[config_options]
            enum A { #[choice(id = 0, default)] X }
        };
        let unmarked: ItemEnum = parse_quote! {
            enum B { #[choice(id = 0, default)] X }
        };
        assert!(has_options_marker(&marked));
        assert!(!has_options_marker(&unmarked));
    }
}

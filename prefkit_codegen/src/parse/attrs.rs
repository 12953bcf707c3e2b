//! Literal extraction helpers for schema marker attributes.

use syn::parenthesized;
use syn::{Lit, LitStr, Token};

/// Consumes an unrecognised key-value or list without recording it.
///
/// Unknown keys are discarded so schema sources keep parsing when new marker
/// arguments appear; every recognised argument is handled explicitly by the
/// callers in this module's siblings.
pub(crate) fn discard_unknown(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Parses a literal from a marker argument using `extractor`.
fn parse_lit<T, F>(
    meta: &syn::meta::ParseNestedMeta<'_>,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(&Lit) -> Option<T>,
{
    let lit = meta.value()?.parse::<Lit>()?;
    extractor(&lit).ok_or_else(|| syn::Error::new(lit.span(), format!("{key} must be {expected}")))
}

/// Parses a string literal argument.
pub(crate) fn lit_str(meta: &syn::meta::ParseNestedMeta<'_>, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "a string", |lit| match lit {
        Lit::Str(s) => Some(s.clone()),
        _ => None,
    })
}

/// Parses a boolean literal argument.
pub(crate) fn lit_bool(meta: &syn::meta::ParseNestedMeta<'_>, key: &str) -> Result<bool, syn::Error> {
    parse_lit(meta, key, "a boolean", |lit| match lit {
        Lit::Bool(b) => Some(b.value),
        _ => None,
    })
}

/// Parses an `i32` literal argument, honouring a leading minus sign.
pub(crate) fn lit_i32(meta: &syn::meta::ParseNestedMeta<'_>, key: &str) -> Result<i32, syn::Error> {
    // A unary minus is not part of a `Lit`, so consume it separately.
    let value = meta.value()?;
    let minus = value.peek(Token![-]);
    if minus {
        value.parse::<Token![-]>()?;
    }
    let lit = value.parse::<Lit>()?;
    match lit {
        Lit::Int(i) => {
            let parsed: i32 = i.base10_parse()?;
            Ok(if minus { -parsed } else { parsed })
        }
        other => Err(syn::Error::new(other.span(), format!("{key} must be an integer"))),
    }
}

/// Parses an `i64` literal argument, honouring a leading minus sign.
pub(crate) fn lit_i64(meta: &syn::meta::ParseNestedMeta<'_>, key: &str) -> Result<i64, syn::Error> {
    let value = meta.value()?;
    let minus = value.peek(Token![-]);
    if minus {
        value.parse::<Token![-]>()?;
    }
    let lit = value.parse::<Lit>()?;
    match lit {
        Lit::Int(i) => {
            let parsed: i64 = i.base10_parse()?;
            Ok(if minus { -parsed } else { parsed })
        }
        other => Err(syn::Error::new(other.span(), format!("{key} must be an integer"))),
    }
}

/// Parses a float literal argument; integer literals are accepted too.
pub(crate) fn lit_f64(meta: &syn::meta::ParseNestedMeta<'_>, key: &str) -> Result<f64, syn::Error> {
    let value = meta.value()?;
    let minus = value.peek(Token![-]);
    if minus {
        value.parse::<Token![-]>()?;
    }
    let lit = value.parse::<Lit>()?;
    let parsed = match lit {
        Lit::Float(f) => f.base10_parse::<f64>()?,
        Lit::Int(i) => i.base10_parse::<f64>()?,
        other => {
            return Err(syn::Error::new(other.span(), format!("{key} must be a number")));
        }
    };
    Ok(if minus { -parsed } else { parsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::Attribute;

    #[test]
    fn lit_str_parses_string_values() {
        let attr: Attribute = syn::parse_quote!(#[string_prop(key = "timeout")]);
        attr.parse_nested_meta(|meta| {
            let s = lit_str(&meta, "key")?;
            assert_eq!(s.value(), "timeout");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn lit_str_rejects_other_literals() {
        let attr: Attribute = syn::parse_quote!(#[string_prop(key = 5)]);
        let err = attr
            .parse_nested_meta(|meta| lit_str(&meta, "key").map(|_| ()))
            .unwrap_err();
        assert!(err.to_string().contains("key must be a string"));
    }

    #[test]
    fn lit_i32_handles_negative_values() {
        let attr: Attribute = syn::parse_quote!(#[int_prop(default = -4)]);
        attr.parse_nested_meta(|meta| {
            assert_eq!(lit_i32(&meta, "default")?, -4);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn lit_f64_accepts_integer_literals() {
        let attr: Attribute = syn::parse_quote!(#[double_prop(default = 2)]);
        attr.parse_nested_meta(|meta| {
            assert!((lit_f64(&meta, "default")? - 2.0).abs() < f64::EPSILON);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn lit_bool_parses_flags_with_values() {
        let attr: Attribute = syn::parse_quote!(#[bool_prop(default = true)]);
        attr.parse_nested_meta(|meta| {
            assert!(lit_bool(&meta, "default")?);
            Ok(())
        })
        .unwrap();
    }
}

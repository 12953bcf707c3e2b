//! Plain data structures for a parsed configuration schema.
//!
//! Everything downstream of parsing works on these types; they carry no
//! behaviour beyond small accessors and are never mutated once validation has
//! run. Property and choice ordering follows declaration order so generated
//! output stays deterministic.

use proc_macro2::TokenStream;

/// The value kind of one configuration property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    I32,
    I64,
    F32,
    F64,
    /// Closed-variant property selected by integer choice id.
    Option,
}

impl ValueKind {
    /// The marker attribute spelling for this kind.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            ValueKind::String => "string_prop",
            ValueKind::Bool => "bool_prop",
            ValueKind::I32 => "int_prop",
            ValueKind::I64 => "long_prop",
            ValueKind::F32 => "float_prop",
            ValueKind::F64 => "double_prop",
            ValueKind::Option => "option_prop",
        }
    }
}

/// A typed compile-time default value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDefault {
    Str(String),
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// The configured default choice id of an option property.
    ChoiceId(i32),
}

/// One selectable variant of a closed option hierarchy.
#[derive(Debug, Clone)]
pub struct OptionChoice {
    /// Unique id within the enclosing hierarchy.
    pub choice_id: i32,
    pub description: String,
    /// Exactly one choice per hierarchy carries the flag.
    pub is_default: bool,
    /// Path tokens of the concrete variant, e.g. `LogLevel::Quiet`.
    pub variant: TokenStream,
}

/// One parsed configuration property.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Member name as declared on the schema trait.
    pub name: String,
    /// Explicit key, or the member name when the author left it blank.
    pub storage_key: String,
    pub value_kind: ValueKind,
    /// Free text, possibly empty.
    pub description: String,
    pub default: PropertyDefault,
    /// Populated only for [`ValueKind::Option`].
    pub choices: Vec<OptionChoice>,
    /// Identifier of the option enum, for emission only.
    pub option_type: Option<syn::Ident>,
    /// Source anchor for diagnostics about this property.
    pub location: Option<crate::diagnostics::SourceLocation>,
}

impl PropertyDescriptor {
    /// The id of the choice flagged `default`, if any.
    #[must_use]
    pub fn flagged_default_choice(&self) -> Option<i32> {
        self.choices.iter().find(|c| c.is_default).map(|c| c.choice_id)
    }
}

/// One parsed configuration group.
#[derive(Debug, Clone)]
pub struct ConfigGroupSchema {
    /// Declared trait name.
    pub name: String,
    /// Storage namespace; defaults to `name` when the author leaves it blank.
    pub group_key: String,
    /// Compilation target owning this group's implementation; empty = all.
    pub target: String,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDescriptor>,
    /// The original trait item, re-emitted (cleaned) by declaration passes.
    pub decl: syn::ItemTrait,
    pub location: Option<crate::diagnostics::SourceLocation>,
}

//! Schema parsing, validation, and code generation for `prefkit`.
//!
//! The pipeline is a single-pass batch transform: a schema source (Rust
//! syntax with `#[config_group]` traits and `#[config_options]` enums) is
//! parsed, cross-group invariants are validated, and implementation code
//! binding every property to the `prefkit` storage abstraction is emitted as
//! a token stream. No failure past initial source parsing aborts the run;
//! offending groups and properties are dropped with diagnostics and the rest
//! still generate.
//!
//! ```
//! use prefkit_codegen::{compile, EmissionPass};
//!
//! let source = r#"
//!     #[config_group(name = "network")]
//!     pub trait NetworkSettings {
//!         #[string_prop(key = "timeout", default = "30s")]
//!         fn timeout(&self) -> String;
//!     }
//! "#;
//! let output = compile(source, &EmissionPass::Combined)?;
//! assert!(output.render().contains("NetworkConfig"));
//! # Ok::<(), prefkit_codegen::CompileError>(())
//! ```

mod diagnostics;
mod generate;
mod parse;
mod schema;
mod target;
mod validate;

use proc_macro2::TokenStream;
use thiserror::Error;

pub use diagnostics::{Diagnostic, DiagnosticCode, Diagnostics, Severity, SourceLocation};
pub use parse::is_valid_group_key;
pub use schema::{
    ConfigGroupSchema, OptionChoice, PropertyDefault, PropertyDescriptor, ValueKind,
};
pub use target::EmissionPass;

/// Hard failures that abort a compilation invocation outright.
///
/// Everything recoverable is reported through [`CompileOutput::diagnostics`]
/// instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The schema source is not parseable Rust.
    #[error("failed to parse schema source: {0}")]
    Parse(#[from] syn::Error),
}

/// The result of one compilation invocation.
#[derive(Debug)]
pub struct CompileOutput {
    /// Generated code for the selected emission pass.
    pub tokens: TokenStream,
    /// Every diagnostic collected across parsing, validation, and emission.
    pub diagnostics: Vec<Diagnostic>,
    /// The validated schema set, for callers that introspect it (docs,
    /// tooling) beyond code emission.
    pub groups: Vec<ConfigGroupSchema>,
}

impl CompileOutput {
    /// Renders the generated tokens as source text for writing to `OUT_DIR`.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.to_string()
    }

    /// True when any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Runs the whole pipeline over one schema source for one emission pass.
///
/// # Errors
///
/// Returns [`CompileError::Parse`] when the source is not valid Rust syntax;
/// every schema-level problem is reported through diagnostics instead.
pub fn compile(source: &str, pass: &EmissionPass) -> Result<CompileOutput, CompileError> {
    let file = syn::parse_file(source)?;
    let option_enums = parse::collect_enums(&file);
    let ordered_enums = parse::marked_enums_ordered(&file);
    let mut diagnostics = Diagnostics::new();

    let parsed = parse::parse_schema(&file, &mut diagnostics);
    let groups = validate::validate_groups(parsed, &mut diagnostics);
    let tokens = generate::emit_all(&groups, &ordered_enums, &option_enums, pass, &mut diagnostics);

    tracing::debug!(
        groups = groups.len(),
        diagnostics = diagnostics.entries().len(),
        "schema compilation finished"
    );

    Ok(CompileOutput {
        tokens,
        diagnostics: diagnostics.into_entries(),
        groups,
    })
}

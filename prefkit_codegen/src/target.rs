//! Emission pass selection for multi-target schema sets.
//!
//! A schema set shared between several target environments is compiled once
//! per environment. The shared pass re-emits the declarations only; each
//! target pass emits concrete implementations for the groups it owns.

use crate::schema::ConfigGroupSchema;

/// What one compilation pass should emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionPass {
    /// Single-target builds: declarations and implementations for every group.
    Combined,
    /// Cleaned schema declarations only (traits and option enums), no
    /// implementations.
    SharedDeclarations,
    /// Implementations for groups owned by `target` (or by no target).
    TargetImplementations { target: String },
}

impl EmissionPass {
    /// Whether this pass emits any implementation code at all.
    #[must_use]
    pub fn emits_implementations(&self) -> bool {
        !matches!(self, EmissionPass::SharedDeclarations)
    }

    /// Whether `group`'s concrete implementation belongs in this pass.
    ///
    /// A blank group target means the group belongs to every target pass.
    #[must_use]
    pub fn includes_group(&self, group: &ConfigGroupSchema) -> bool {
        match self {
            EmissionPass::Combined => true,
            EmissionPass::SharedDeclarations => false,
            EmissionPass::TargetImplementations { target } => {
                group.target.is_empty() || group.target == *target
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn group(target: &str) -> ConfigGroupSchema {
        ConfigGroupSchema {
            name: "Net".into(),
            group_key: "net".into(),
            target: target.into(),
            properties: Vec::new(),
            decl: parse_quote! { trait Net {} },
            location: None,
        }
    }

    #[test]
    fn combined_pass_takes_everything() {
        assert!(EmissionPass::Combined.includes_group(&group("device")));
        assert!(EmissionPass::Combined.includes_group(&group("")));
    }

    #[test]
    fn shared_pass_emits_no_implementations() {
        let pass = EmissionPass::SharedDeclarations;
        assert!(!pass.emits_implementations());
        assert!(!pass.includes_group(&group("")));
    }

    #[test]
    fn target_pass_matches_owned_and_unowned_groups() {
        let pass = EmissionPass::TargetImplementations {
            target: "device".into(),
        };
        assert!(pass.includes_group(&group("device")));
        assert!(pass.includes_group(&group("")));
        assert!(!pass.includes_group(&group("host")));
    }
}

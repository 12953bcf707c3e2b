//! Runtime introspection metadata for generated configuration groups.
//!
//! Each generated group exposes a `descriptors()` accessor returning one
//! [`ConfigItemDescriptor`] per property. A descriptor carries the property's
//! identity and default alongside closures wired back to the generated
//! accessors, so a settings UI can read, update, and reset values without
//! knowing the concrete group type.

use crate::value::ConfigValue;

type CurrentFn = Box<dyn Fn() -> ConfigValue + Send + Sync>;
type UpdateFn = Box<dyn Fn(&ConfigValue) + Send + Sync>;
type ResetFn = Box<dyn Fn() + Send + Sync>;
type CurrentIdFn = Box<dyn Fn() -> i32 + Send + Sync>;
type SelectFn = Box<dyn Fn(i32) + Send + Sync>;

/// Metadata for one configuration property.
pub enum ConfigItemDescriptor {
    /// A primitive-valued property.
    Standard(StandardItem),
    /// A closed-variant property selected by integer choice id.
    Option(OptionItem),
}

impl ConfigItemDescriptor {
    /// The property's storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            ConfigItemDescriptor::Standard(item) => &item.key,
            ConfigItemDescriptor::Option(item) => &item.key,
        }
    }

    /// Human-readable description, possibly empty.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            ConfigItemDescriptor::Standard(item) => &item.description,
            ConfigItemDescriptor::Option(item) => &item.description,
        }
    }

    /// Writes the property's working default back to storage.
    pub fn reset(&self) {
        match self {
            ConfigItemDescriptor::Standard(item) => (item.reset)(),
            ConfigItemDescriptor::Option(item) => (item.reset)(),
        }
    }
}

/// Descriptor for a primitive-valued property.
pub struct StandardItem {
    key: String,
    description: String,
    default: ConfigValue,
    current: CurrentFn,
    update: UpdateFn,
    reset: ResetFn,
}

impl StandardItem {
    /// Builds a descriptor from the generated accessor closures.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        default: ConfigValue,
        current: CurrentFn,
        update: UpdateFn,
        reset: ResetFn,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            default,
            current,
            update,
            reset,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The working default at the time the descriptor was built.
    #[must_use]
    pub fn default(&self) -> &ConfigValue {
        &self.default
    }

    /// Reads the currently stored value.
    #[must_use]
    pub fn current(&self) -> ConfigValue {
        (self.current)()
    }

    /// Applies `value` through the generated write accessor. Values that do
    /// not coerce to the property's kind are ignored.
    pub fn update(&self, value: &ConfigValue) {
        (self.update)(value);
    }
}

/// One selectable choice of an option property.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChoiceItem {
    pub id: i32,
    pub description: String,
}

/// Descriptor for a closed-variant property.
pub struct OptionItem {
    key: String,
    description: String,
    choices: Vec<ChoiceItem>,
    default_id: i32,
    current_id: CurrentIdFn,
    select: SelectFn,
    reset: ResetFn,
}

impl OptionItem {
    /// Builds a descriptor from the generated accessor closures.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        choices: Vec<ChoiceItem>,
        default_id: i32,
        current_id: CurrentIdFn,
        select: SelectFn,
        reset: ResetFn,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            choices,
            default_id,
            current_id,
            select,
            reset,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every selectable choice, in declaration order.
    #[must_use]
    pub fn choices(&self) -> &[ChoiceItem] {
        &self.choices
    }

    /// The configured default choice id.
    #[must_use]
    pub fn default_id(&self) -> i32 {
        self.default_id
    }

    /// The id of the currently selected choice, after fallback resolution.
    #[must_use]
    pub fn current_id(&self) -> i32 {
        (self.current_id)()
    }

    /// Selects the choice with `id`. Unrecognised ids are ignored.
    pub fn select(&self, id: i32) {
        (self.select)(id);
    }
}

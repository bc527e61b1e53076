//! Built-in lints for type graph validation.

mod duplicate_enum;
mod enum_collision;
mod inheritance_cycle;
mod unresolved_reference;

pub use duplicate_enum::DuplicateEnumLint;
pub use enum_collision::EnumCollisionLint;
pub use inheritance_cycle::InheritanceCycleLint;
pub use unresolved_reference::UnresolvedReferenceLint;

//! Style primitives: roles, visual properties and attribute sets.
//!
//! - [`StyleRole`]: a semantic identifier such as `color-is-selected`
//! - [`Property`]: the closed set of visual properties a role can set
//! - [`AttributeSet`]: an ordered property → value mapping with overlay merging

mod attributes;
mod property;
mod role;

pub use attributes::AttributeSet;
pub use property::Property;
pub use role::{split_roles, StyleRole};

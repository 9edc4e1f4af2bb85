//! Schema module.
//!
//! Defines the sixteen features of a patient record, the domain each one
//! accepts, and validation of complete records against that contract.

pub mod feature;
pub mod field;
#[allow(clippy::module_inception)]
pub mod schema;

// Re-export commonly used types
pub use feature::Feature;
pub use field::{FieldDefinition, FieldDomain};
pub use schema::Schema;

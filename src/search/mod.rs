//! Search specifications
//!
//! Conditions, named sets, the AND/OR spec with its optimizer, versioned
//! upgrades and the saved-search XML format.

mod condition;
mod migration;
mod set;
mod spec;
mod xml;

pub use condition::{ConditionKind, Payload, SearchCondition};
pub use migration::{CURRENT_VERSION, MIGRATIONS, Migration};
pub use set::SearchSet;
pub use spec::{SearchSpec, SpecState};
pub use xml::SpecError;

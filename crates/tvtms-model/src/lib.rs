pub mod diagnostic;
pub mod enums;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod reference;
pub mod row;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use enums::{ActionTier, Category, MappingType};
pub use error::{ModelError, Result};
pub use ids::{BookId, RowId, Tradition};
pub use mapping::{Documentation, Mapping, Rule};
pub use reference::{Chapter, Reference};
pub use row::{RawRow, SectionRangeLine};

//! Language Detection and Entity Extraction
//!
//! Pattern-based extraction of functions, classes and imports.
//!
//! ```rust,ignore
//! use codegenius::analyzer::parser::EntityExtractor;
//!
//! let entities = EntityExtractor::extract("class A:\n    def f(self): ...", "py");
//! assert_eq!(entities.classes, vec!["A"]);
//! ```

pub mod extractor;
pub mod language;
pub mod profiles;

pub use extractor::{EntityExtractor, RepositoryExtractor, decode_source};
pub use language::{Language, ProfileKind};
pub use profiles::{LanguageProfile, PatternRule, profile_for};

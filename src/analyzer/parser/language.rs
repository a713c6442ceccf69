//! Language Detection Module
//!
//! **Single source of truth** for mapping file extensions to languages and to the
//! extraction profile that handles them.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use codegenius::analyzer::parser::{Language, ProfileKind};
//!
//! let lang = Language::from_path("src/app.tsx");
//! assert_eq!(lang, Language::Tsx);
//! assert_eq!(lang.display_name(), "React TypeScript");
//! assert_eq!(lang.profile(), ProfileKind::JavaScript);
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// Language Metadata Table - Single Source of Truth
// =============================================================================

/// Language metadata entry
struct LanguageMeta {
    /// Human-readable name, also used in prompts
    display_name: &'static str,
    /// Short tag (upper-case primary extension)
    tag: &'static str,
    /// File extensions that map to this language
    extensions: &'static [&'static str],
    /// Extraction rule set
    profile: ProfileKind,
}

macro_rules! lang_meta {
    ($display:literal, $tag:literal, [$($ext:literal),*], $profile:ident) => {
        LanguageMeta {
            display_name: $display,
            tag: $tag,
            extensions: &[$($ext),*],
            profile: ProfileKind::$profile,
        }
    };
}

impl Language {
    fn meta(&self) -> LanguageMeta {
        match self {
            Language::Python => lang_meta!("Python", "PY", ["py"], Python),
            Language::JavaScript => lang_meta!("JavaScript", "JS", ["js"], JavaScript),
            Language::TypeScript => lang_meta!("TypeScript", "TS", ["ts"], JavaScript),
            Language::Tsx => lang_meta!("React TypeScript", "TSX", ["tsx"], JavaScript),
            Language::Jsx => lang_meta!("React JavaScript", "JSX", ["jsx"], JavaScript),
            Language::Java => lang_meta!("Java", "JAVA", ["java"], Java),
            Language::C => lang_meta!("C", "C", ["c", "h"], CFamily),
            Language::Cpp => lang_meta!("C++", "CPP", ["cpp", "cc", "cxx", "hpp"], CFamily),
            Language::CSharp => lang_meta!("C#", "CS", ["cs"], CSharp),
            Language::Php => lang_meta!("PHP", "PHP", ["php"], Php),
            Language::Ruby => lang_meta!("Ruby", "RB", ["rb"], Ruby),
            Language::Go => lang_meta!("Go", "GO", ["go"], Generic),
            Language::Rust => lang_meta!("Rust", "RS", ["rs"], Generic),
            Language::Swift => lang_meta!("Swift", "SWIFT", ["swift"], Generic),
            Language::Kotlin => lang_meta!("Kotlin", "KT", ["kt"], Generic),
            Language::Scala => lang_meta!("Scala", "SCALA", ["scala"], Generic),
            Language::Unknown => lang_meta!("Unknown", "TEXT", [], Generic),
        }
    }
}

// =============================================================================
// Language Enum Definition
// =============================================================================

/// Source languages the extractor recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
    Java,
    C,
    Cpp,
    CSharp,
    Php,
    Ruby,
    Go,
    Rust,
    Swift,
    Kotlin,
    Scala,
    #[default]
    Unknown,
}

/// Rule set used to extract entities from a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    Python,
    JavaScript,
    Java,
    CFamily,
    CSharp,
    Php,
    Ruby,
    Generic,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Tsx,
        Language::Jsx,
        Language::Java,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Php,
        Language::Ruby,
        Language::Go,
        Language::Rust,
        Language::Swift,
        Language::Kotlin,
        Language::Scala,
    ];

    /// Detect language from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.meta().extensions.contains(&ext.as_str()))
            .unwrap_or(Language::Unknown)
    }

    /// Detect language from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    pub fn display_name(&self) -> &'static str {
        self.meta().display_name
    }

    pub fn tag(&self) -> &'static str {
        self.meta().tag
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.meta().extensions
    }

    pub fn profile(&self) -> ProfileKind {
        self.meta().profile
    }

    /// Whether files of this language are extracted at all
    pub fn is_supported(&self) -> bool {
        !matches!(self, Language::Unknown)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("a.py"), Language::Python);
        assert_eq!(Language::from_path("web/app.tsx"), Language::Tsx);
        assert_eq!(Language::from_path("lib/x.hpp"), Language::Cpp);
        assert_eq!(Language::from_path("include/x.h"), Language::C);
        assert_eq!(Language::from_path("Main.JAVA"), Language::Java);
        assert_eq!(Language::from_path("README.md"), Language::Unknown);
        assert_eq!(Language::from_path("Makefile"), Language::Unknown);
    }

    #[test]
    fn test_profiles() {
        assert_eq!(Language::TypeScript.profile(), ProfileKind::JavaScript);
        assert_eq!(Language::Jsx.profile(), ProfileKind::JavaScript);
        assert_eq!(Language::Cpp.profile(), ProfileKind::CFamily);
        assert_eq!(Language::Go.profile(), ProfileKind::Generic);
        assert_eq!(Language::Rust.profile(), ProfileKind::Generic);
        assert_eq!(Language::Unknown.profile(), ProfileKind::Generic);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Language::Tsx.display_name(), "React TypeScript");
        assert_eq!(Language::CSharp.display_name(), "C#");
        assert_eq!(Language::Python.to_string(), "Python");
        assert_eq!(Language::Ruby.tag(), "RB");
    }

    #[test]
    fn test_every_extension_round_trips() {
        for lang in Language::ALL {
            assert!(lang.is_supported());
            for ext in lang.extensions() {
                assert_eq!(Language::from_extension(ext), *lang, "{ext}");
            }
        }
        assert!(!Language::Unknown.is_supported());
    }
}

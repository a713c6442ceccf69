//! Extraction Rule Tables
//!
//! Each [`ProfileKind`] owns three independent single-pass text rules: function
//! signatures, class/type declarations and import/include lines. Adding a
//! language is a table entry, not a new code path.
//!
//! Rules are heuristics over raw text, not a parser. They may pick up names from
//! comments or strings and they miss unusual formatting.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::language::ProfileKind;

/// Control-flow keywords that brace-style signature rules can mistake for names
const C_STYLE_RESERVED: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "case", "catch", "return", "new",
    "throw", "sizeof", "using", "lock", "synchronized", "delete",
];

/// One text-matching rule.
///
/// A match yields its first participating capture group, or the whole match when
/// the pattern has none, trimmed. Matches in `reserved` are dropped.
pub struct PatternRule {
    regex: Regex,
    reserved: &'static [&'static str],
}

impl PatternRule {
    fn new(pattern: &str) -> Self {
        Self::with_reserved(pattern, &[])
    }

    fn with_reserved(pattern: &str, reserved: &'static [&'static str]) -> Self {
        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => panic!("invalid built-in extraction pattern {pattern:?}: {e}"),
        };
        Self { regex, reserved }
    }

    /// All matches in first-occurrence order, duplicates kept
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let m = (1..caps.len())
                    .find_map(|i| caps.get(i))
                    .or_else(|| caps.get(0))?;
                let value = m.as_str().trim();
                (!value.is_empty() && !self.reserved.contains(&value)).then(|| value.to_string())
            })
            .collect()
    }
}

/// Function, class and import rules for one family of languages
pub struct LanguageProfile {
    pub function: PatternRule,
    pub class: PatternRule,
    /// `None` means the profile extracts no imports
    pub import: Option<PatternRule>,
}

static PROFILES: LazyLock<HashMap<ProfileKind, LanguageProfile>> = LazyLock::new(|| {
    HashMap::from([
        (
            ProfileKind::Python,
            LanguageProfile {
                function: PatternRule::new(r"(?m)^[ \t]*(?:async[ \t]+)?def[ \t]+(\w+)[ \t]*\("),
                class: PatternRule::new(r"(?m)^[ \t]*class[ \t]+(\w+)[ \t]*[:(]"),
                import: Some(PatternRule::new(
                    r"(?m)^[ \t]*(?:from[ \t]+[\w.]+[ \t]+import|import[ \t]+[\w.]+)",
                )),
            },
        ),
        (
            ProfileKind::JavaScript,
            LanguageProfile {
                function: PatternRule::new(
                    r"\bfunction\*?\s+(\w+)\s*\(|\b(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|\w+\s*=>)",
                ),
                class: PatternRule::new(r"\bclass\s+(\w+)"),
                import: Some(PatternRule::new(
                    r#"(?m)^[ \t]*import\s+(?:[\w*{}\s,$]+\s+from\s+)?['"]([^'"]+)['"]|\brequire\(\s*['"]([^'"]+)['"]\s*\)"#,
                )),
            },
        ),
        (
            ProfileKind::Java,
            LanguageProfile {
                function: PatternRule::with_reserved(
                    r"(?m)^[ \t]*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default)\s+)*(?:<[^>]+>\s+)?[\w<>\[\],.?]+\s+(\w+)\s*\([^;{]*\)\s*(?:throws\s+[\w.,\s]+)?\{",
                    C_STYLE_RESERVED,
                ),
                class: PatternRule::new(r"\b(?:class|interface|enum|record)\s+(\w+)"),
                import: Some(PatternRule::new(r"(?m)^[ \t]*import\s+[^;]+;")),
            },
        ),
        (
            ProfileKind::CFamily,
            LanguageProfile {
                function: PatternRule::with_reserved(
                    r"(?m)^[ \t]*(?:[\w*&<>,]+[ \t*&]+)+(?:[\w:]+::)?(~?\w+)\s*\([^;{]*\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?\{",
                    C_STYLE_RESERVED,
                ),
                class: PatternRule::new(r"\b(?:class|struct)\s+(\w+)\s*(?:final\s*)?(?::[^;{]*)?\{"),
                import: Some(PatternRule::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*[<"]([^>"]+)[>"]"#)),
            },
        ),
        (
            ProfileKind::CSharp,
            LanguageProfile {
                function: PatternRule::with_reserved(
                    r"(?m)^[ \t]*(?:(?:public|private|protected|internal|static|virtual|override|abstract|sealed|async|extern|unsafe|new|partial|readonly)\s+)*[\w<>\[\],.?]+\s+(\w+)\s*(?:<[^>]*>)?\s*\([^;{]*\)\s*(?:where\s[^{;]+)?(?:\{|=>)",
                    C_STYLE_RESERVED,
                ),
                class: PatternRule::new(r"\b(?:class|interface|struct|enum|record)\s+(\w+)"),
                import: Some(PatternRule::new(r"(?m)^[ \t]*using\s+[\w.=\s]+;")),
            },
        ),
        (
            ProfileKind::Php,
            LanguageProfile {
                function: PatternRule::new(r"\bfunction\s+&?(\w+)\s*\("),
                class: PatternRule::new(r"\b(?:class|interface|trait)\s+(\w+)"),
                import: Some(PatternRule::new(
                    r#"(?m)^[ \t]*(?:require|include)(?:_once)?\s*\(?\s*['"]([^'"]+)['"]"#,
                )),
            },
        ),
        (
            ProfileKind::Ruby,
            LanguageProfile {
                function: PatternRule::new(r"(?m)^[ \t]*def\s+(?:self\.)?(\w+[?!=]?)"),
                class: PatternRule::new(r"(?m)^[ \t]*(?:class|module)\s+([A-Z]\w*)"),
                import: Some(PatternRule::new(
                    r#"(?m)^[ \t]*(?:require|require_relative)\s*\(?\s*['"]([^'"]+)['"]"#,
                )),
            },
        ),
        (
            ProfileKind::Generic,
            LanguageProfile {
                function: PatternRule::new(r"\b(?:function|def|func)\s+(\w+)\s*\("),
                class: PatternRule::new(r"\bclass\s+(\w+)"),
                import: None,
            },
        ),
    ])
});

/// Rule set for a profile; unknown kinds fall back to the generic rules
pub fn profile_for(kind: ProfileKind) -> &'static LanguageProfile {
    PROFILES
        .get(&kind)
        .or_else(|| PROFILES.get(&ProfileKind::Generic))
        .unwrap_or_else(|| unreachable!("generic profile is always registered"))
}

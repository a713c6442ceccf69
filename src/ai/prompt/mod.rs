//! Prompt Builder System
//!
//! Standardized prompt construction for enrichment calls.

use crate::analyzer::parser::Language;
use crate::types::FileRecord;

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value pairs
    Context(Vec<(String, String)>),
    /// Raw text paragraph
    Text(String),
    /// Code block with language
    Code { language: String, content: String },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section if any
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let entry = (key.to_string(), value.to_string());
        let mut found = false;
        for section in &mut self.sections {
            if let PromptSection::Context(ctx) = section {
                ctx.push(entry.clone());
                found = true;
                break;
            }
        }
        if !found {
            self.sections.push(PromptSection::Context(vec![entry]));
        }
        self
    }

    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text(content.to_string()));
        self
    }

    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("Please provide:\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push('\n');
                }
                PromptSection::Context(ctx) => {
                    for (key, value) in ctx {
                        prompt.push_str(&format!("{}: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{}\n", language));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

/// Enrichment prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Whole-file analysis over the capped preview
    pub fn file_analysis(record: &FileRecord) -> String {
        let lang = record.language.display_name();
        PromptBuilder::new()
            .text(&format!(
                "Analyze this {} code file and provide insights:",
                lang
            ))
            .context_item("File", &record.path)
            .context_item("Language", lang)
            .code(&record.language.tag().to_ascii_lowercase(), &record.preview)
            .objectives(vec![
                "A brief description of what this file does",
                "Key functions and their purposes",
                "Classes and their responsibilities (if applicable)",
                "Important design patterns or architectural decisions",
                "Dependencies and relationships",
            ])
            .text("Keep the analysis concise but informative.")
            .build()
    }

    /// Purpose of one function, inferred from its name
    pub fn function_purpose(name: &str, language: Language) -> String {
        let lang = language.display_name();
        PromptBuilder::new()
            .text(&format!("Analyze this {} function/method:", lang))
            .text(&format!("{}(...)", name))
            .text(&format!(
                "Based on the function name and typical usage patterns in {}, what does this function likely do?",
                lang
            ))
            .text("Provide a brief description.")
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Entities;

    #[test]
    fn test_basic_prompt() {
        let prompt = PromptBuilder::new()
            .text("Review this module:")
            .objectives(vec!["Analyze code", "Generate docs"])
            .build();

        assert!(prompt.starts_with("Review this module:\n\nPlease provide:\n"));
        assert!(prompt.contains("1. Analyze code"));
        assert!(prompt.contains("2. Generate docs"));
    }

    #[test]
    fn test_context_items_keep_order() {
        let prompt = PromptBuilder::new()
            .context_item("File", "a.py")
            .context_item("Language", "Python")
            .build();
        assert_eq!(prompt, "File: a.py\nLanguage: Python");
    }

    #[test]
    fn test_file_analysis_uses_preview() {
        let record = FileRecord::new(
            "web/app.tsx",
            Language::Tsx,
            "export const App = () => null;\n// tail that is cut off".to_string(),
            Entities::default(),
            30,
        );
        let prompt = PromptTemplates::file_analysis(&record);

        assert!(prompt.contains("Analyze this React TypeScript code file"));
        assert!(prompt.contains("File: web/app.tsx"));
        assert!(prompt.contains("```tsx\nexport const App = () => null;"));
        assert!(!prompt.contains("tail that is cut off"));
        assert!(prompt.contains("5. Dependencies and relationships"));
    }

    #[test]
    fn test_function_purpose() {
        let prompt = PromptTemplates::function_purpose("parse_args", Language::Python);
        assert!(prompt.contains("Analyze this Python function/method:"));
        assert!(prompt.contains("parse_args(...)"));
        assert!(prompt.contains("typical usage patterns in Python"));
    }
}

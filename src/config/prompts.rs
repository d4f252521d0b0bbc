//! Prompt templates for draftcast.
//!
//! The article prompt can be customized by placing an `article.toml` file in
//! the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Template placeholder replaced with the transcript or pasted notes.
pub const SOURCE_TEXT_VAR: &str = "source_text";

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub article: ArticlePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for article drafting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlePrompts {
    pub system: String,
    /// User message template. Must contain `{{source_text}}`.
    pub user: String,
}

impl Default for ArticlePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a senior financial editor for a publication dedicated to long-term investing.
Your goal is to transform a video transcript (or raw notes) into a high-quality, educational news article.

TONE GUIDELINES:
- **Educational & Analytical:** Summarize the analysis clearly.
- **Humble but Confident:** Use "we" and "us" to represent the editorial team.
- **Long-term Mindset:** Focus on business fundamentals, not just daily price moves.
- **Compliance Safe:** Use language like "investors might watch" rather than "you must buy."
- **Formatting:** Use clear H2 headings and bullet points.

STRUCTURE:
1. **Headline:** Compelling and news-focused (e.g., "Why CSL Shares Are Moving Today").
2. **The Lede:** A 2-3 sentence intro summarizing the main topic.
3. **Key Points / The Analysis:** Extract the core arguments from the text as short paragraphs or bullet points.
4. **Our House View:** A concluding paragraph that summarizes the long-term implication.
5. **Transition:** A final sentence that seamlessly leads to an email sign-up (e.g., "While this is a strong company, there are other opportunities we are watching...").

The input text follows in the next message."#
                .to_string(),

            user: format!("{{{{{}}}}}", SOURCE_TEXT_VAR),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let article_path = Self::article_path(dir);
            if article_path.exists() {
                let content = std::fs::read_to_string(&article_path)?;
                prompts.article = toml::from_str(&content)?;
            }
        }

        if !prompts.article.user.contains(&format!("{{{{{}}}}}", SOURCE_TEXT_VAR)) {
            return Err(crate::error::DraftError::Config(format!(
                "article user prompt must contain {{{{{}}}}}",
                SOURCE_TEXT_VAR
            )));
        }

        Ok(prompts)
    }

    /// Path of the article prompt override inside a custom prompts directory.
    pub fn article_path(custom_dir: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(custom_dir).to_string()).join("article.toml")
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.article.system.contains("senior financial editor"));
        assert_eq!(prompts.article.user, "{{source_text}}");
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_custom_variables_are_overridden_by_provided() {
        let mut custom = HashMap::new();
        custom.insert("who".to_string(), "config".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("who".to_string(), "caller".to_string());
        assert_eq!(prompts.render_with_custom("{{who}}", &vars), "caller");
        assert_eq!(prompts.render_with_custom("{{who}}", &HashMap::new()), "config");
    }

    #[test]
    fn test_load_article_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("article.toml"),
            "system = \"Write for {{publication}}.\"\nuser = \"Notes:\\n{{source_text}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.article.system, "Write for {{publication}}.");
        assert_eq!(prompts.article.user, "Notes:\n{{source_text}}");
    }

    #[test]
    fn test_override_without_placeholder_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("article.toml"), "user = \"no slot here\"\n").unwrap();

        assert!(Prompts::load(dir.path().to_str(), None).is_err());
    }
}

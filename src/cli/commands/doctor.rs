//! Doctor command - verify configuration and prompt templates.

use crate::cli::Output;
use crate::config::{Prompts, Settings, API_KEY_ENV};
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: &std::path::Path) -> anyhow::Result<()> {
    Output::header("draftcast Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_check = check_api_key(settings);
    api_check.print();
    checks.push(api_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(config_path),
        check_languages(settings),
        check_prompts(settings),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using draftcast.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! draftcast is ready to use.");
    }

    Ok(())
}

/// Check if the OpenAI API key is configured.
fn check_api_key(settings: &Settings) -> CheckResult {
    match settings.api_key() {
        Ok(key) if key.starts_with("sk-") && key.len() > 20 => {
            CheckResult::ok(API_KEY_ENV, &format!("configured ({})", mask_key(&key)))
        }
        Ok(_) => CheckResult::warning(
            API_KEY_ENV,
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        Err(_) => CheckResult::error(
            API_KEY_ENV,
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...' or [openai] api_key in the config file",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &std::path::Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: draftcast config init",
        )
    }
}

fn check_languages(settings: &Settings) -> CheckResult {
    let languages = &settings.transcript.languages;
    if languages.is_empty() {
        CheckResult::error(
            "Transcript languages",
            "empty",
            "Set transcript.languages, e.g. [\"en\", \"en-AU\", \"en-GB\", \"en-US\"]",
        )
    } else {
        CheckResult::ok("Transcript languages", &languages.join(" > "))
    }
}

fn check_prompts(settings: &Settings) -> CheckResult {
    let custom_dir = settings.prompts.custom_dir.as_deref();
    match Prompts::load(custom_dir, Some(&settings.prompts.variables)) {
        Ok(_) => match custom_dir {
            Some(dir) if Prompts::article_path(dir).exists() => CheckResult::ok(
                "Article prompt",
                &format!("{}", Prompts::article_path(dir).display()),
            ),
            _ => CheckResult::ok("Article prompt", "built-in"),
        },
        Err(e) => CheckResult::error(
            "Article prompt",
            &e.to_string(),
            "Fix article.toml in the custom prompts directory",
        ),
    }
}

/// Keep the first seven and last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("sk-proj-abcdefghijklmnop1234"), "sk-proj...1234");
        assert_eq!(mask_key("sk-ééééééééééééééééééé€€€€"), "sk-éééé...€€€€");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn test_check_languages() {
        let mut settings = Settings::default();
        assert_eq!(check_languages(&settings).status, CheckStatus::Ok);
        settings.transcript.languages.clear();
        assert_eq!(check_languages(&settings).status, CheckStatus::Error);
    }

    #[test]
    fn test_check_broken_prompt_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("article.toml"), "user = \"missing slot\"\n").unwrap();

        let mut settings = Settings::default();
        settings.prompts.custom_dir = Some(dir.path().to_string_lossy().to_string());
        assert_eq!(check_prompts(&settings).status, CheckStatus::Error);
    }
}

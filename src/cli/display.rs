//! Terminal rendering of analysis results
//!
//! Features:
//! - Color-coded summary of category and tag counts
//! - Example tokens per category, shown with their ids

use crate::analysis::{Category, ClassificationResult, ScriptTag};
use crate::output::IdListSource;
use crate::vocab::Vocabulary;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{stdout, Result as IoResult, Write};

const RULE_WIDTH: usize = 60;

/// Console summary renderer
pub struct Display {
    width: usize,
}

impl Display {
    pub fn new() -> Self {
        Display { width: RULE_WIDTH }
    }

    fn rule(&self, ch: char) -> String {
        ch.to_string().repeat(self.width)
    }

    /// Print one labelled count, indented by `depth`
    fn show_count(&self, label: &str, count: usize, depth: usize, color: Color) -> IoResult<()> {
        let mut stdout = stdout();
        let indent = "  ".repeat(depth + 1);
        execute!(
            stdout,
            Print(format!("{}{:<34}", indent, label)),
            SetForegroundColor(color),
            Print(format!("{:>10}\n", count)),
            ResetColor
        )
    }

    /// Render the statistics block for a run
    pub fn show_summary(&self, model_id: &str, result: &ClassificationResult) -> IoResult<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::Blue),
            Print(self.rule('=')),
            Print("\n"),
            ResetColor,
            SetForegroundColor(Color::Cyan),
            Print(format!(" Token analysis summary: {}\n", model_id)),
            ResetColor,
            Print(self.rule('-')),
            Print("\n"),
        )?;

        let max_id = result
            .max_token_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        execute!(
            stdout,
            Print(format!("  Vocab size:                 {:>10}\n", result.vocab_size())),
            Print(format!(
                "  Excluded special tokens:    {:>10}\n",
                result.excluded_special_ids().len()
            )),
            Print(format!(
                "  Excluded below min id:      {:>10}\n",
                result.excluded_below_min()
            )),
            Print(format!(
                "  Analyzed id range:          {} - {}\n",
                result.min_token_id(),
                max_id
            )),
            Print(format!(
                "  Analyzed tokens:            {:>10}\n",
                result.analyzed_count()
            )),
            Print(self.rule('-')),
            Print("\n  Categories (exclusive):\n"),
        )?;

        for category in Category::ALL {
            let color = if category.is_japanese() {
                Color::Green
            } else if category == Category::Uncategorized {
                Color::DarkGrey
            } else {
                Color::Yellow
            };
            self.show_count(category.name(), result.count(category), 1, color)?;
        }
        self.show_count("japanese (bias list)", result.japanese_ids().len(), 1, Color::Magenta)?;

        execute!(stdout, Print("  Tags (overlapping):\n"))?;
        for tag in ScriptTag::ALL {
            self.show_count(tag.name(), result.tag_count(tag), 1, Color::White)?;
        }

        execute!(
            stdout,
            SetForegroundColor(Color::Blue),
            Print(self.rule('=')),
            Print("\n\n"),
            ResetColor
        )?;
        stdout.flush()
    }

    /// Print up to `max_tokens` example tokens of one list
    pub fn show_examples(
        &self,
        title: &str,
        source: IdListSource,
        vocab: &Vocabulary,
        result: &ClassificationResult,
        max_tokens: usize,
    ) -> IoResult<()> {
        let mut stdout = stdout();
        let ids = source.ids(result);

        execute!(
            stdout,
            SetForegroundColor(Color::Magenta),
            Print(format!("--- Examples: {} (up to {}) ---\n", title, max_tokens)),
            ResetColor
        )?;

        if ids.is_empty() {
            execute!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print("  (no tokens in this category)\n"),
                ResetColor
            )?;
        }

        for &id in ids.iter().take(max_tokens) {
            let token = vocab
                .get(id)
                .map(|t| t.display())
                .unwrap_or_else(|| "<missing>".to_string());
            execute!(
                stdout,
                Print(format!("  ID: {:<8}| Token: ", id)),
                SetForegroundColor(Color::Cyan),
                Print(token),
                ResetColor,
                Print("\n")
            )?;
        }

        execute!(stdout, Print("-".repeat(title.len() + 24)), Print("\n"))?;
        stdout.flush()
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TokenClassifier;
    use crate::vocab::TokenText;

    #[test]
    fn test_rule_width() {
        let display = Display::new();
        assert_eq!(display.rule('=').chars().count(), RULE_WIDTH);
    }

    #[test]
    fn test_render_does_not_fail() {
        let texts: Vec<TokenText> = vec!["日本".into(), "abc".into()];
        let vocab = Vocabulary::from_texts(texts, []).unwrap();
        let result = TokenClassifier::default().classify(&vocab, 0);
        let display = Display::new();

        display.show_summary("test", &result).unwrap();
        display
            .show_examples(
                "Pure English",
                IdListSource::Category(Category::PureEnglish),
                &vocab,
                &result,
                5,
            )
            .unwrap();
    }
}

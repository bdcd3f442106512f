//! LLM-backed advice.

use super::AdviceGenerator;
use crate::model::MetricValue;
use crate::sources::TextAnalysis;

/// Longest accepted recommendation, in characters.
pub const MAX_ADVICE_CHARS: usize = 120;

/// Asks a language model for one short recommendation per metric.
pub struct LlmAdvisor<'a> {
    client: &'a dyn TextAnalysis,
    practice_name: String,
}

impl<'a> LlmAdvisor<'a> {
    pub fn new(client: &'a dyn TextAnalysis, practice_name: impl Into<String>) -> Self {
        Self {
            client,
            practice_name: practice_name.into(),
        }
    }

    fn prompt(&self, metric: &str, value: &MetricValue) -> String {
        format!(
            "You advise dental practices on their online presence.\n\
             Practice: {}\nMetric: {metric}\nCurrent value: {value}\n\
             Reply with one actionable recommendation on a single line, at most \
             {MAX_ADVICE_CHARS} characters. If the value is already excellent reply \
             exactly \"You nailed it\". Reply with the recommendation only.",
            self.practice_name
        )
    }

    /// Accept a single non-empty line within the length limit.
    fn accept(completion: &str) -> Option<String> {
        let line = completion.trim().trim_matches('"').trim();
        if line.is_empty() || line.contains('\n') || line.chars().count() > MAX_ADVICE_CHARS {
            return None;
        }
        Some(line.to_string())
    }
}

impl AdviceGenerator for LlmAdvisor<'_> {
    fn generate(&self, metric: &str, value: &MetricValue) -> Option<String> {
        let completion = self.client.complete(&self.prompt(metric, value))?;
        let advice = Self::accept(&completion);
        if advice.is_none() {
            tracing::debug!(metric, "Rejected LLM advice: {:?}", completion);
        }
        advice
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::Advisor;
    use crate::model::names;

    struct Reply(&'static str);

    impl TextAnalysis for Reply {
        fn complete(&self, _prompt: &str) -> Option<String> {
            Some(self.0.to_string())
        }

        fn name(&self) -> &'static str {
            "reply"
        }
    }

    #[test]
    fn test_accepts_short_single_line() {
        assert_eq!(
            LlmAdvisor::accept("  \"Add a Book Now button to every page\"\n"),
            Some("Add a Book Now button to every page".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_multiline_and_long() {
        assert_eq!(LlmAdvisor::accept("   "), None);
        assert_eq!(LlmAdvisor::accept("First do this.\nThen that."), None);
        assert_eq!(LlmAdvisor::accept(&"x".repeat(MAX_ADVICE_CHARS + 1)), None);
        assert!(LlmAdvisor::accept(&"x".repeat(MAX_ADVICE_CHARS)).is_some());
    }

    #[test]
    fn test_rejected_reply_falls_back_to_rules() {
        let client = Reply("Here are five ideas:\n1. ...\n2. ...");
        let advisor = Advisor::with_primary(LlmAdvisor::new(&client, "Bright Smiles"));
        assert_eq!(
            advisor.advise(names::INSURANCE, &MetricValue::label("Unclear")),
            "Publish accepted plans on site & GBP"
        );
    }
}

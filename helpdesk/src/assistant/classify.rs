//! Keyword-based reply selection for the assistant.
//!
//! Deterministic and stateless: the question is lowercased and tested for
//! substrings in a fixed priority order. First match wins.

/// Reply for refund questions.
pub const REFUND_REPLY: &str = "Refunds can be processed within 30 days of purchase. Please visit our Returns Center to initiate a refund request.";

/// Reply for contact and support questions.
pub const CONTACT_REPLY: &str =
    "You can contact our support team 24/7 at support@example.com or call +1 (555) 123-4567.";

/// Reply for account questions.
pub const ACCOUNT_REPLY: &str = "For account-related questions, please check the Account Settings section or contact our support team.";

/// Reply when nothing matches.
pub const FALLBACK_REPLY: &str =
    "I'm here to help! Could you please provide more details about your question?";

/// Category a question falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    /// Mentions "refund".
    Refund,
    /// Mentions "contact" or "support".
    Contact,
    /// Mentions "account".
    Account,
    /// No keyword matched.
    Fallback,
}

impl ReplyCategory {
    /// Categories in match priority order, with their keywords.
    const RULES: [(Self, &'static [&'static str]); 3] = [
        (Self::Refund, &["refund"]),
        (Self::Contact, &["contact", "support"]),
        (Self::Account, &["account"]),
    ];

    /// Classify a question.
    #[must_use]
    pub fn of(question: &str) -> Self {
        let lower = question.to_lowercase();
        Self::RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(Self::Fallback, |(category, _)| *category)
    }

    /// Canned reply for this category.
    #[must_use]
    pub const fn reply(self) -> &'static str {
        match self {
            Self::Refund => REFUND_REPLY,
            Self::Contact => CONTACT_REPLY,
            Self::Account => ACCOUNT_REPLY,
            Self::Fallback => FALLBACK_REPLY,
        }
    }
}

/// Reply text for a question.
#[must_use]
pub fn classify(question: &str) -> &'static str {
    ReplyCategory::of(question).reply()
}

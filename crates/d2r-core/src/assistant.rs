//! The canned-response Q&A assistant.
//!
//! Deterministic keyword lookup over a fixed answer table; no model, no
//! network. Matching is case-insensitive substring on the user's message.

use serde::{Deserialize, Serialize};

use crate::office::Confidence;

/// One assistant reply: answer text, how trustworthy the content is, and
/// follow-up prompts the host can offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    pub confidence: Confidence,
    pub related_questions: Vec<String>,
}

/// Answer a user question from the canned-response table.
pub fn reply(message: &str) -> AssistantReply {
    let lower = message.to_lowercase();

    if lower.contains("cost") || lower.contains("money") {
        return AssistantReply {
            message: "Campaign costs vary widely by office level. Federal House races: \
                      $800,000-$2,500,000. State legislative: $25,000-$400,000. Local races: \
                      $15,000-$50,000. Budget breakdown: 35-45% media, 25-30% staff, 15-20% \
                      field operations."
                .to_owned(),
            confidence: Confidence::High,
            related_questions: vec![
                "How should I start fundraising?".to_owned(),
                "What are FEC contribution limits?".to_owned(),
            ],
        };
    }

    if lower.contains("fundrais") {
        return AssistantReply {
            message: "Start fundraising 12-18 months before election for federal races. \
                      Individual contribution limits are $3,300 per election. Most campaigns \
                      spend 3-5 hours daily on call time. Set up ActBlue (Democrats) or WinRed \
                      (Republicans) immediately."
                .to_owned(),
            confidence: Confidence::Verified,
            related_questions: vec![
                "When should I hire a finance director?".to_owned(),
                "What are reporting requirements?".to_owned(),
            ],
        };
    }

    AssistantReply {
        message: "I can help with questions about campaign costs, fundraising, filing \
                  requirements, hiring staff, and strategy. What would you like to know?"
            .to_owned(),
        confidence: Confidence::Medium,
        related_questions: vec![
            "How much will my campaign cost?".to_owned(),
            "When should I start fundraising?".to_owned(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_questions_match_case_insensitively() {
        let r = reply("How much MONEY do I need?");
        assert_eq!(r.confidence, Confidence::High);
        assert!(r.message.contains("$800,000-$2,500,000"));
    }

    #[test]
    fn fundraising_stem_matches_variants() {
        for q in ["fundraising tips?", "how do I fundraise"] {
            let r = reply(q);
            assert_eq!(r.confidence, Confidence::Verified);
            assert!(r.message.contains("ActBlue"));
        }
    }

    #[test]
    fn cost_rule_wins_when_both_match() {
        // Lookup order mirrors the production table: cost before fundraising.
        let r = reply("what does fundraising cost?");
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn unmatched_questions_get_the_default_reply() {
        let r = reply("what's the weather like?");
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.related_questions.len(), 2);
    }

    #[test]
    fn replies_are_deterministic() {
        assert_eq!(reply("campaign costs"), reply("campaign costs"));
    }
}

//! Documents, checklists and generator replies.

use std::time::Duration;

use clausewatch::analysis::Checklist;
use clausewatch::pipeline::PipelineConfig;

/// Several paragraphs, long enough to split into many chunks at [`small_chunks`] sizing.
pub const LONG_POLICY: &str = "\
Welcome to Example Corp. These terms govern your use of our website, mobile apps and services.

Information we collect. We collect your name, email address, phone number and payment details \
when you create an account or make a purchase.

Sharing. We may sell or share your personal data with third parties, including advertisers and \
data brokers, for marketing purposes.

Disputes. Any dispute arising from these terms shall be resolved exclusively by binding \
arbitration in Delaware, and not in a court of law.

Class actions. You agree to waive any right to participate in a class action lawsuit or \
class-wide arbitration against Example Corp.

Your content. By posting content you grant us a perpetual, worldwide, royalty-free license to \
use, copy, modify and distribute your content for any purpose.

Location. Our app may collect your precise location in the background, even when you are not \
actively using the app.

Changes. We may change these terms at any time without notifying you. Continued use of the \
service means you accept the updated terms.

Cookies. We use cookies to remember your preferences. You can disable cookies in your browser \
settings.

Contact. Questions about these terms can be sent to our support team by email.";

/// A document just under the default minimum length.
pub fn short_text() -> String {
    "x".repeat(199)
}

pub fn test_checklist() -> Checklist {
    Checklist::new([
        "Do they sell or share my personal data with third parties?",
        "Is there a forced arbitration clause?",
        "Can they change the terms without notifying me?",
    ])
    .expect("valid checklist")
}

/// Pipeline sized so [`LONG_POLICY`] produces many chunks.
pub fn small_chunks() -> PipelineConfig {
    PipelineConfig {
        chunk_size: 200,
        chunk_overlap: 40,
        generation_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Generator reply answering every concern, flagging the concerns at `flagged`.
pub fn verdicts_json(checklist: &Checklist, flagged: &[usize]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = checklist
        .iter()
        .enumerate()
        .map(|(i, concern)| {
            let verdict = if flagged.contains(&i) {
                "YES. The document says so."
            } else {
                "NO"
            };
            (concern.as_str().to_string(), verdict.into())
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

use crate::analysis::Checklist;
use crate::context::ContextSet;

/// Builds the single-shot audit prompt: persona, context block, numbered questions and the
/// JSON-only answer format.
pub fn build_prompt(checklist: &Checklist, context: &ContextSet) -> String {
    let context_len: usize = context.chunks().iter().map(|c| c.len()).sum();
    let mut prompt = String::with_capacity(1024 + context_len);

    prompt.push_str("You are a strict Privacy Auditor.\n");
    prompt.push_str("Analyze the following Terms of Service text.\n\n");

    prompt.push_str("CONTEXT FROM DOCUMENT:\n");
    prompt.push_str(&context.render());
    prompt.push_str("\n\n");

    prompt.push_str("YOUR TASK:\nAnswer the following questions.\n\n");

    prompt.push_str("QUESTIONS:\n");
    for (i, concern) in checklist.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, concern));
    }
    prompt.push('\n');

    prompt.push_str(
        "OUTPUT FORMAT:\n\
         Return strictly a valid JSON object. Keys are the questions, copied exactly.\n\
         Values MUST follow this format:\n\
         - If SAFE: \"NO\"\n\
         - If UNSAFE: \"YES. [Insert a short 1-sentence quote or explanation from the text]\"\n\n\
         IMPORTANT:\n\
         - Do NOT just say \"YES\". You MUST explain WHY.\n\
         - Do NOT use markdown code blocks. Just raw JSON.\n",
    );

    prompt
}

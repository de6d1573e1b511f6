use vibespec_core::ProjectAnswer;

pub const SYSTEM: &str = "You are an AI assistant helping non-technical \"vibe coders\" understand \
project types and requirements. Explain things in simple, friendly terms without technical jargon.";

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    prompt.push_str(&format!(
        "I want to build a {}. Can you explain what this typically involves and what key \
         features I should consider? Keep it simple and friendly.",
        crate::project_type_id(answer)
    ));
}

use vibespec_core::ProjectAnswer;

pub const SYSTEM: &str = "You are helping a non-technical person understand what features their \
project should have. Suggest practical, essential features in simple terms.";

/// Descriptions at or under this many characters are too thin to suggest from.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Whether the answer carries enough context to ask for suggestions.
pub fn qualifies(answer: &ProjectAnswer) -> bool {
    answer.project_type.is_some() && answer.description.chars().count() > MIN_DESCRIPTION_CHARS
}

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    prompt.push_str(&format!(
        "For a {} project called \"{}\" with description: \"{}\", suggest 8-10 specific, \
         actionable features that would be valuable. Return only a simple list of features, \
         one per line, without numbers or bullets. Focus on features that are commonly needed \
         for this type of project.",
        crate::project_type_id(answer),
        answer.project_name,
        answer.description
    ));
}

use vibespec_core::ProjectAnswer;

pub const SYSTEM: &str = "You are a tech consultant helping non-technical people choose the right \
technology stack. Explain choices in simple terms focusing on benefits and why they work well together.";

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    prompt.push_str(&format!(
        "Based on this project: Type: {}, Name: \"{}\", Description: \"{}\", Features: {}.\n\n",
        crate::project_type_id(answer),
        answer.project_name,
        answer.description,
        answer.core_features.join(", ")
    ));
    prompt.push_str(
        "Recommend the best technology stack and explain why each choice is ideal for this \
         specific project. Consider the project complexity, features needed, and ease of use \
         for a non-technical person.\n\n\
         Please provide:\n\
         1. A brief explanation of why this stack works well\n\
         2. Specific recommendations for: Frontend, Backend, Database, Hosting\n\
         3. Keep explanations simple and focus on benefits\n\n\
         Format your response as explanatory text, not a list.",
    );
}

use vibespec_core::ProjectAnswer;

pub const SYSTEM: &str = "You are a product manager helping to write detailed project descriptions. \
Take brief ideas and expand them into comprehensive, actionable descriptions that developers can \
understand and build from.";

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    let name = if answer.project_name.trim().is_empty() {
        "Unnamed Project"
    } else {
        answer.project_name.as_str()
    };

    prompt.push_str(
        "Take this basic project description and expand it into a comprehensive, detailed \
         description that clearly explains:\n\n\
         1. What the project does\n\
         2. What problem it solves\n\
         3. Who the target users are\n\
         4. Key features and functionality\n\
         5. What makes it valuable or unique\n\n",
    );
    prompt.push_str(&format!("Original description: \"{}\"\n", answer.description));
    prompt.push_str(&format!("Project type: {}\n", crate::project_type_id(answer)));
    prompt.push_str(&format!("Project name: {name}\n\n"));
    prompt.push_str(
        "Please rewrite this as a detailed, professional project description that would help \
         developers understand exactly what to build. Keep the same core idea but add context, \
         user scenarios, and specific functionality details. Write it in a clear, engaging way \
         as flowing prose, not a list.",
    );
}

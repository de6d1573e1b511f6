use vibespec_core::ProjectAnswer;

pub const SYSTEM: &str = "You are a technology consultant. Generate comprehensive, accurate \
technology options for different project types. Always return valid JSON only, no additional text.";

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    let kind = crate::project_type_id(answer);

    prompt.push_str(&format!(
        "Generate technology stack options for a {kind} project. For each category \
         (frontend, backend, database, hosting), provide 8-12 relevant options with:\n\n"
    ));
    prompt.push_str(
        "1. value: kebab-case identifier\n\
         2. label: Display name\n\
         3. description: Brief explanation of what it is and why it's good for this project type\n\
         4. pros: Array of 3 key benefits\n\
         5. difficulty: \"Easy\", \"Medium\", or \"Hard\"\n\n",
    );
    prompt.push_str("Categories needed:\n");
    prompt.push_str(&format!(
        "- frontend: User interface technologies appropriate for {kind}\n"
    ));
    prompt.push_str("- backend: Server/API technologies (include \"none\" option for static projects)\n");
    prompt.push_str("- database: Data storage options (include \"none\" option)\n");
    prompt.push_str(&format!(
        "- hosting: Deployment platforms suitable for {kind}\n\n"
    ));
    prompt.push_str(
        "For mobile apps, include React Native, Flutter, Swift, Kotlin, Ionic, etc.\n\
         For web apps, include React, Vue, Angular, etc.\n\
         For games, include Unity, Godot, Phaser, etc.\n\n",
    );
    prompt.push_str(
        r#"Return as valid JSON in this exact format, with no text before or after it:
{
  "frontend": {
    "title": "User Interface",
    "description": "Technologies for building the user interface",
    "options": [
      {
        "value": "react-native",
        "label": "React Native",
        "description": "Cross-platform mobile development with JavaScript",
        "pros": ["Single codebase", "Native performance", "Large community"],
        "difficulty": "Medium"
      }
    ]
  },
  "backend": { "title": "...", "description": "...", "options": [] },
  "database": { "title": "...", "description": "...", "options": [] },
  "hosting": { "title": "...", "description": "...", "options": [] }
}"#,
    );
}

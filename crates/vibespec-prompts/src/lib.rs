pub mod enhance;
pub mod features;
pub mod final_spec;
pub mod guidance;
pub mod recommend;
pub mod requirements;
pub mod tech_options;

use vibespec_core::{AssistTask, ChatMessage, ProjectAnswer};

/// A rendered system/user instruction pair for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub task: AssistTask,
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

/// Assemble the prompt for a task from the answers collected so far.
pub fn assemble_prompt(answer: &ProjectAnswer, task: AssistTask) -> Prompt {
    let mut user = String::new();

    let system = match task {
        AssistTask::ProjectGuidance => {
            guidance::append_instructions(&mut user, answer);
            guidance::SYSTEM
        }
        AssistTask::FeatureSuggestions => {
            features::append_instructions(&mut user, answer);
            features::SYSTEM
        }
        AssistTask::DescriptionEnhancement => {
            enhance::append_instructions(&mut user, answer);
            enhance::SYSTEM
        }
        AssistTask::TechOptions => {
            tech_options::append_instructions(&mut user, answer);
            tech_options::SYSTEM
        }
        AssistTask::StackRecommendation => {
            recommend::append_instructions(&mut user, answer);
            recommend::SYSTEM
        }
        AssistTask::FinalSpecification => {
            final_spec::append_instructions(&mut user, answer);
            final_spec::SYSTEM
        }
    };

    Prompt {
        task,
        system: system.to_string(),
        user,
    }
}

pub(crate) fn project_type_id(answer: &ProjectAnswer) -> &'static str {
    answer.project_type.map(|t| t.as_str()).unwrap_or("project")
}

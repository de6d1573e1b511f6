pub mod assist;
pub mod catalog;
pub mod error;
pub mod message;
pub mod project;
pub mod requirement;
pub mod step;
pub mod testing;

mod blank;

pub use assist::AssistTask;
pub use catalog::{
    recommended_stack, CategoryOptions, Difficulty, TechCategory, TechOption, TechOptionCatalog,
};
pub use error::VibespecError;
pub use message::{ChatMessage, Role};
pub use project::{AnswerUpdate, ProjectAnswer, ProjectType, TechStack};
pub use requirement::{ProfessionalRequirements, RequirementFlag};
pub use step::WizardStep;
pub use testing::{Testing, TestingApproach};

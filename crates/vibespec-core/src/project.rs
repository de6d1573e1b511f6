use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blank::Keyed;
use crate::catalog::TechCategory;
use crate::error::VibespecError;
use crate::requirement::{ProfessionalRequirements, RequirementFlag};
use crate::testing::{Testing, TestingApproach};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Website,
    WebApp,
    MobileApp,
    Ecommerce,
    SocialPlatform,
    Game,
}

impl ProjectType {
    pub const ALL: &[ProjectType] = &[
        ProjectType::Website,
        ProjectType::WebApp,
        ProjectType::MobileApp,
        ProjectType::Ecommerce,
        ProjectType::SocialPlatform,
        ProjectType::Game,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Website => "website",
            ProjectType::WebApp => "web-app",
            ProjectType::MobileApp => "mobile-app",
            ProjectType::Ecommerce => "ecommerce",
            ProjectType::SocialPlatform => "social-platform",
            ProjectType::Game => "game",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Website => "Website",
            ProjectType::WebApp => "Web Application",
            ProjectType::MobileApp => "Mobile App",
            ProjectType::Ecommerce => "E-commerce",
            ProjectType::SocialPlatform => "Social Platform",
            ProjectType::Game => "Game",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProjectType::Website => "Portfolio, blog, or business website",
            ProjectType::WebApp => "Interactive web-based application",
            ProjectType::MobileApp => "iOS or Android application",
            ProjectType::Ecommerce => "Online store or marketplace",
            ProjectType::SocialPlatform => "Community or social networking site",
            ProjectType::Game => "Browser or mobile game",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "website" => Some(ProjectType::Website),
            "web-app" => Some(ProjectType::WebApp),
            "mobile-app" => Some(ProjectType::MobileApp),
            "ecommerce" => Some(ProjectType::Ecommerce),
            "social-platform" => Some(ProjectType::SocialPlatform),
            "game" => Some(ProjectType::Game),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Keyed for ProjectType {
    fn key(&self) -> &'static str {
        self.as_str()
    }

    fn from_key(s: &str) -> Option<Self> {
        Self::parse_str(s)
    }
}

/// Selected option identifier per tech category. An empty string is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStack {
    pub frontend: String,
    pub backend: String,
    pub database: String,
    pub hosting: String,
}

impl TechStack {
    pub fn get(&self, category: TechCategory) -> &str {
        match category {
            TechCategory::Frontend => &self.frontend,
            TechCategory::Backend => &self.backend,
            TechCategory::Database => &self.database,
            TechCategory::Hosting => &self.hosting,
        }
    }

    pub fn with(&self, category: TechCategory, value: impl Into<String>) -> TechStack {
        let mut next = self.clone();
        let slot = match category {
            TechCategory::Frontend => &mut next.frontend,
            TechCategory::Backend => &mut next.backend,
            TechCategory::Database => &mut next.database,
            TechCategory::Hosting => &mut next.hosting,
        };
        *slot = value.into();
        next
    }

    pub fn is_empty(&self) -> bool {
        TechCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    pub fn is_complete(&self) -> bool {
        TechCategory::ALL.iter().all(|c| !self.get(*c).is_empty())
    }
}

/// Everything the wizard has collected so far.
///
/// Updates never mutate in place: [`ProjectAnswer::apply`] returns the next
/// value and the previous one is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectAnswer {
    #[serde(with = "crate::blank")]
    pub project_type: Option<ProjectType>,
    pub project_name: String,
    pub description: String,
    pub target_audience: String,
    pub core_features: Vec<String>,
    pub tech_stack: TechStack,
    pub testing: Testing,
    pub professional_requirements: ProfessionalRequirements,
    pub additional_requirements: Vec<String>,
}

/// A single field-level change requested by a wizard step.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerUpdate {
    ProjectType(ProjectType),
    ProjectName(String),
    Description(String),
    TargetAudience(String),
    /// Trimmed first; ignored when blank or already present after trimming.
    AddFeature(String),
    RemoveFeature(usize),
    TechChoice(TechCategory, String),
    TechStack(TechStack),
    TestingApproach(TestingApproach),
    ToggleRequirement(RequirementFlag),
    AddRequirement(String),
    RemoveRequirement(usize),
}

impl ProjectAnswer {
    pub fn apply(&self, update: AnswerUpdate) -> ProjectAnswer {
        let mut next = self.clone();
        match update {
            AnswerUpdate::ProjectType(kind) => {
                // Stack choices come from the per-type catalog and do not carry over.
                if next.project_type != Some(kind) {
                    next.tech_stack = TechStack::default();
                }
                next.project_type = Some(kind);
            }
            AnswerUpdate::ProjectName(name) => next.project_name = name,
            AnswerUpdate::Description(text) => next.description = text,
            AnswerUpdate::TargetAudience(text) => next.target_audience = text,
            AnswerUpdate::AddFeature(feature) => push_unique(&mut next.core_features, &feature),
            AnswerUpdate::RemoveFeature(index) => remove_at(&mut next.core_features, index),
            AnswerUpdate::TechChoice(category, value) => {
                next.tech_stack = next.tech_stack.with(category, value);
            }
            AnswerUpdate::TechStack(stack) => next.tech_stack = stack,
            AnswerUpdate::TestingApproach(approach) => next.testing = Testing::for_approach(approach),
            AnswerUpdate::ToggleRequirement(flag) => {
                next.professional_requirements = next.professional_requirements.toggled(flag);
            }
            AnswerUpdate::AddRequirement(text) => {
                push_unique(&mut next.additional_requirements, &text)
            }
            AnswerUpdate::RemoveRequirement(index) => {
                remove_at(&mut next.additional_requirements, index)
            }
        }
        next
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.core_features.iter().any(|f| f == feature)
    }

    pub fn to_pretty_json(&self) -> Result<String, VibespecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name the generated specification is saved under.
    pub fn spec_file_name(&self) -> Result<String, VibespecError> {
        let slug = self
            .project_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        if slug.is_empty() {
            return Err(VibespecError::InvalidInput(
                "project name is required to name the specification file".into(),
            ));
        }
        Ok(format!("{slug}-prompt.txt"))
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

fn remove_at(list: &mut Vec<String>, index: usize) {
    if index < list.len() {
        list.remove(index);
    }
}

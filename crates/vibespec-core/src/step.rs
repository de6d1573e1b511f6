use std::fmt;

use crate::project::ProjectAnswer;

pub const MIN_FEATURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Welcome,
    ProjectType,
    Details,
    Features,
    TechStack,
    Testing,
    ProfessionalFeatures,
    FinalDetails,
    Generate,
}

impl WizardStep {
    pub const ALL: &[WizardStep] = &[
        WizardStep::Welcome,
        WizardStep::ProjectType,
        WizardStep::Details,
        WizardStep::Features,
        WizardStep::TechStack,
        WizardStep::Testing,
        WizardStep::ProfessionalFeatures,
        WizardStep::FinalDetails,
        WizardStep::Generate,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "Welcome",
            WizardStep::ProjectType => "Project Type",
            WizardStep::Details => "Details",
            WizardStep::Features => "Features",
            WizardStep::TechStack => "Tech Stack",
            WizardStep::Testing => "Testing",
            WizardStep::ProfessionalFeatures => "Professional Features",
            WizardStep::FinalDetails => "Final Details",
            WizardStep::Generate => "Generate Prompt",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> WizardStep {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(WizardStep::Generate)
    }

    pub fn previous(&self) -> WizardStep {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(WizardStep::Welcome)
    }

    /// Presence checks gating the advance action. Nothing is raised when a
    /// step is incomplete; the step simply cannot be left forward.
    pub fn can_advance(&self, answer: &ProjectAnswer) -> bool {
        match self {
            WizardStep::Welcome => true,
            WizardStep::ProjectType => answer.project_type.is_some(),
            WizardStep::Details => {
                !answer.project_name.trim().is_empty()
                    && !answer.description.trim().is_empty()
                    && !answer.target_audience.trim().is_empty()
            }
            WizardStep::Features => answer.core_features.len() >= MIN_FEATURES,
            WizardStep::TechStack => answer.tech_stack.is_complete(),
            WizardStep::Testing => answer.testing.approach.is_some(),
            WizardStep::ProfessionalFeatures | WizardStep::FinalDetails => true,
            WizardStep::Generate => false,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

use std::fmt;

/// Every kind of model call the wizard makes, with its generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistTask {
    ProjectGuidance,
    FeatureSuggestions,
    DescriptionEnhancement,
    TechOptions,
    StackRecommendation,
    FinalSpecification,
}

impl AssistTask {
    pub const ALL: &[AssistTask] = &[
        AssistTask::ProjectGuidance,
        AssistTask::FeatureSuggestions,
        AssistTask::DescriptionEnhancement,
        AssistTask::TechOptions,
        AssistTask::StackRecommendation,
        AssistTask::FinalSpecification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistTask::ProjectGuidance => "project_guidance",
            AssistTask::FeatureSuggestions => "feature_suggestions",
            AssistTask::DescriptionEnhancement => "description_enhancement",
            AssistTask::TechOptions => "tech_options",
            AssistTask::StackRecommendation => "stack_recommendation",
            AssistTask::FinalSpecification => "final_specification",
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            AssistTask::ProjectGuidance => 500,
            AssistTask::FeatureSuggestions => 300,
            AssistTask::DescriptionEnhancement => 400,
            AssistTask::TechOptions => 2000,
            AssistTask::StackRecommendation => 400,
            AssistTask::FinalSpecification => 3000,
        }
    }

    /// Structured outputs run cold, prose runs warm.
    pub fn temperature(&self) -> f32 {
        match self {
            AssistTask::TechOptions => 0.3,
            AssistTask::FinalSpecification => 0.2,
            _ => 0.7,
        }
    }
}

impl fmt::Display for AssistTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_tasks_use_low_temperature() {
        for task in AssistTask::ALL {
            let t = task.temperature();
            match task {
                AssistTask::TechOptions | AssistTask::FinalSpecification => {
                    assert!((0.2..=0.3).contains(&t), "{task} = {t}")
                }
                _ => assert!((t - 0.7).abs() < f32::EPSILON, "{task} = {t}"),
            }
        }
    }

    #[test]
    fn final_specification_gets_largest_budget() {
        let max = AssistTask::ALL.iter().map(|t| t.max_tokens()).max();
        assert_eq!(max, Some(AssistTask::FinalSpecification.max_tokens()));
    }
}

use tracing::info;
use vibespec_core::{
    recommended_stack, AssistTask, ProjectAnswer, TechOptionCatalog, TechStack,
};
use vibespec_prompts::{assemble_prompt, features};

use crate::gateway::{Completion, FallbackReason, ModelGateway};
use crate::parse::{parse_catalog, parse_line_list, CatalogOutcome};

/// Explanation text plus the stack the wizard should highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackAdvice {
    pub explanation: String,
    /// Only set when the model actually answered.
    pub recommended: Option<TechStack>,
}

/// One method per wizard assist call: prompt, gateway, parser.
#[derive(Clone)]
pub struct Assistant {
    gateway: ModelGateway,
}

impl Assistant {
    pub fn new(gateway: ModelGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    async fn run(&self, answer: &ProjectAnswer, task: AssistTask) -> Completion {
        let prompt = assemble_prompt(answer, task);
        self.gateway.complete_outcome(prompt.messages(), task).await
    }

    pub async fn guidance(&self, answer: &ProjectAnswer) -> String {
        self.run(answer, AssistTask::ProjectGuidance).await.into_text()
    }

    /// Suggested features, or none when the answer is too thin to ask about
    /// or the call fell back.
    pub async fn suggest_features(&self, answer: &ProjectAnswer) -> Vec<String> {
        if !features::qualifies(answer) {
            return Vec::new();
        }
        match self.run(answer, AssistTask::FeatureSuggestions).await {
            Completion::Text(text) => parse_line_list(&text),
            Completion::Fallback(_) => Vec::new(),
        }
    }

    /// Expanded description for the user to review. Fallbacks are returned
    /// as such so they are never offered as a replacement description.
    pub async fn enhance_description(&self, answer: &ProjectAnswer) -> Completion {
        if answer.description.trim().is_empty() {
            return Completion::Fallback(FallbackReason::Empty);
        }
        self.run(answer, AssistTask::DescriptionEnhancement).await
    }

    pub async fn tech_options(&self, answer: &ProjectAnswer) -> CatalogOutcome {
        match self.run(answer, AssistTask::TechOptions).await {
            Completion::Text(text) => parse_catalog(&text, answer.project_type),
            Completion::Fallback(reason) => {
                info!("tech options unavailable ({reason:?}), using built-in catalog");
                CatalogOutcome::fallback(answer.project_type, reason.message())
            }
        }
    }

    pub async fn recommend_stack(
        &self,
        answer: &ProjectAnswer,
        catalog: &TechOptionCatalog,
    ) -> StackAdvice {
        match self.run(answer, AssistTask::StackRecommendation).await {
            Completion::Text(explanation) => StackAdvice {
                explanation,
                recommended: Some(recommended_stack(
                    answer.project_type,
                    &answer.core_features,
                    catalog,
                )),
            },
            Completion::Fallback(reason) => StackAdvice {
                explanation: reason.message().to_string(),
                recommended: None,
            },
        }
    }

    /// The final specification, keeping fallbacks distinguishable so they
    /// are never saved as a document.
    pub async fn specification(&self, answer: &ProjectAnswer) -> Completion {
        self.run(answer, AssistTask::FinalSpecification).await
    }

    pub async fn generate_specification(&self, answer: &ProjectAnswer) -> String {
        self.specification(answer).await.into_text()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::gateway::{GatewayConfig, FALLBACK_ERROR};
    use crate::mock::MockTransport;
    use vibespec_core::{ProjectType, Role};

    fn assistant(mock: Arc<MockTransport>) -> Assistant {
        Assistant::new(ModelGateway::with_transport(
            GatewayConfig::direct(Some("sk-test".into())),
            mock,
        ))
    }

    fn answer() -> ProjectAnswer {
        ProjectAnswer {
            project_type: Some(ProjectType::WebApp),
            project_name: "Tutor Hub".into(),
            description: "Match students with tutors for weekly lessons".into(),
            target_audience: "Students".into(),
            core_features: vec!["User login".into(), "Booking".into(), "Reviews".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn suggestions_are_parsed_into_list() {
        let mock = Arc::new(MockTransport::completion("1. Calendar sync\n2. Messaging\n\n- Payments"));
        let out = assistant(mock.clone()).suggest_features(&answer()).await;
        assert_eq!(out, vec!["Calendar sync", "Messaging", "Payments"]);
        let call = &mock.calls()[0];
        assert_eq!(call.max_tokens, 300);
        assert_eq!(call.messages[1].role, Role::User);
        assert!(call.messages[1].content.contains("Tutor Hub"));
    }

    #[tokio::test]
    async fn short_description_skips_suggestion_call() {
        let mock = Arc::new(MockTransport::completion("Login"));
        let mut thin = answer();
        thin.description = "tutors".into();
        assert!(assistant(mock.clone()).suggest_features(&thin).await.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn fallback_text_is_never_a_suggestion() {
        let mock = Arc::new(MockTransport::status(500, "{}"));
        assert!(assistant(mock).suggest_features(&answer()).await.is_empty());
    }

    #[tokio::test]
    async fn tech_options_fall_back_on_failure() {
        let mock = Arc::new(MockTransport::failure("offline"));
        let outcome = assistant(mock).tech_options(&answer()).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.catalog, TechOptionCatalog::fallback(Some(ProjectType::WebApp)));
    }

    #[tokio::test]
    async fn tech_options_use_generated_catalog() {
        let generated = TechOptionCatalog::fallback(Some(ProjectType::Game));
        let mock = Arc::new(MockTransport::completion(
            &serde_json::to_string(&generated).unwrap(),
        ));
        let outcome = assistant(mock).tech_options(&answer()).await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.catalog, generated);
    }

    #[tokio::test]
    async fn recommendation_includes_stack_only_on_success() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::WebApp));

        let ok = Arc::new(MockTransport::completion("React and Node suit this."));
        let advice = assistant(ok).recommend_stack(&answer(), &catalog).await;
        assert_eq!(advice.explanation, "React and Node suit this.");
        let stack = advice.recommended.unwrap();
        assert_eq!(stack.frontend, "react");
        assert_eq!(stack.backend, "node");

        let failed = Arc::new(MockTransport::failure("offline"));
        let advice = assistant(failed).recommend_stack(&answer(), &catalog).await;
        assert_eq!(advice.explanation, FALLBACK_ERROR);
        assert!(advice.recommended.is_none());
    }

    #[tokio::test]
    async fn blank_description_is_not_enhanced() {
        let mock = Arc::new(MockTransport::completion("long text"));
        let mut blank = answer();
        blank.description = "   ".into();
        let outcome = assistant(mock.clone()).enhance_description(&blank).await;
        assert!(outcome.is_fallback());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn specification_uses_rubric_and_low_temperature() {
        let mock = Arc::new(MockTransport::completion("# PROJECT SPECIFICATION"));
        let spec = assistant(mock.clone()).generate_specification(&answer()).await;
        assert_eq!(spec, "# PROJECT SPECIFICATION");
        let call = &mock.calls()[0];
        assert_eq!(call.max_tokens, 3000);
        assert!(call.messages[0].content.contains("RUBRIC"));
        assert!(call.messages[1].content.contains("MANDATORY REQUIREMENTS"));
    }
}

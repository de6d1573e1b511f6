//! State machine tests for the wizard App.
//!
//! Each test builds an App over a MockTransport that answers each assist
//! prompt with canned text, then simulates key events. Model calls run on a
//! dedicated tokio Runtime; `wait_for_results` blocks until they land.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;
use vibespec_core::{
    ProjectType, RequirementFlag, TechCategory, TechOptionCatalog, TestingApproach, WizardStep,
};
use vibespec_service::{
    Assistant, GatewayConfig, MockTransport, ModelGateway, FALLBACK_ERROR, MISSING_CREDENTIAL,
};
use vibespec_tui::app::{App, Field, Mode};
use vibespec_tui::requests::{AssistResult, Payload, Slot};

const WAIT: Duration = Duration::from_secs(5);

const GUIDANCE: &str = "A web app runs in the browser and remembers its users.";
const ENHANCED: &str = "Tutor Hub connects students with vetted tutors for weekly lessons.";
const ADVICE: &str = "React and Node suit this project well.";
const SPEC: &str = "# PROJECT SPECIFICATION\nTutor Hub";

struct Harness {
    app: App,
    mock: Arc<MockTransport>,
    dir: tempfile::TempDir,
    _runtime: Runtime,
}

fn generated_catalog() -> TechOptionCatalog {
    TechOptionCatalog::fallback(Some(ProjectType::Game))
}

fn scripted() -> MockTransport {
    MockTransport::completion("Unexpected prompt")
        .route_completion("I want to build", GUIDANCE)
        .route_completion("suggest 8-10", "1. Calendar sync\n2. Messaging\n- Reviews")
        .route_completion("Original description", ENHANCED)
        .route_completion(
            "Generate technology stack options",
            &serde_json::to_string(&generated_catalog()).unwrap(),
        )
        .route_completion("Based on this project", ADVICE)
        .route_completion("PROJECT DATA", SPEC)
}

fn harness_with(config: GatewayConfig, mock: MockTransport) -> Harness {
    let runtime = Runtime::new().unwrap();
    let mock = Arc::new(mock);
    let gateway = ModelGateway::with_transport(config, mock.clone());
    let dir = tempfile::tempdir().unwrap();
    let app = App::new(
        Assistant::new(gateway),
        runtime.handle().clone(),
        dir.path().join("specs"),
    )
    .unwrap();
    Harness {
        app,
        mock,
        dir,
        _runtime: runtime,
    }
}

fn harness(mock: MockTransport) -> Harness {
    harness_with(GatewayConfig::direct(Some("sk-test".into())), mock)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(char_key(c));
    }
}

/// How many prompts so far had `needle` in their last message.
fn prompts_containing(h: &Harness, needle: &str) -> usize {
    h.mock
        .calls()
        .iter()
        .filter(|c| c.messages.last().is_some_and(|m| m.content.contains(needle)))
        .count()
}

fn settle(app: &mut App) {
    assert!(app.wait_for_results(WAIT), "model calls did not finish");
}

/// Welcome -> pick Web Application -> Details.
fn to_details(app: &mut App) {
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('j'));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.step(), WizardStep::Details);
}

fn fill_details(app: &mut App) {
    for (i, text) in [
        "Tutor Hub",
        "Match students with tutors for weekly lessons",
        "Students",
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            app.handle_key(char_key('j'));
        }
        app.handle_key(key(KeyCode::Enter));
        type_text(app, text);
        app.handle_key(key(KeyCode::Enter));
    }
}

fn add_feature(app: &mut App, feature: &str) {
    app.handle_key(char_key('a'));
    type_text(app, feature);
    app.handle_key(key(KeyCode::Enter));
}

fn to_features(app: &mut App) {
    to_details(app);
    fill_details(app);
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.step(), WizardStep::Features);
    settle(app);
}

fn to_tech_stack(app: &mut App) {
    to_features(app);
    for feature in ["User login", "Booking", "Reviews"] {
        add_feature(app, feature);
    }
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.step(), WizardStep::TechStack);
    settle(app);
}

fn to_generate(app: &mut App) {
    to_tech_stack(app);
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.step(), WizardStep::Testing);
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::PageDown));
    app.handle_key(char_key(' '));
    app.handle_key(key(KeyCode::PageDown));
    app.handle_key(key(KeyCode::PageDown));
    assert_eq!(app.step(), WizardStep::Generate);
    settle(app);
}

// ---- Navigation and gating ----

#[test]
fn app_starts_on_welcome() {
    let h = harness(scripted());
    assert_eq!(h.app.step(), WizardStep::Welcome);
    assert!(matches!(h.app.mode(), Mode::Normal));
    assert!(!h.app.needs_polling());
}

#[test]
fn project_type_is_required() {
    let mut h = harness(scripted());
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.step(), WizardStep::ProjectType);

    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::ProjectType);
    assert!(h.app.status_message().is_some());

    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.answer().project_type, Some(ProjectType::Website));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Details);
}

#[test]
fn page_up_goes_back() {
    let mut h = harness(scripted());
    to_details(&mut h.app);
    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::ProjectType);
    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::Welcome);
}

#[test]
fn details_need_all_three_fields() {
    let mut h = harness(scripted());
    to_details(&mut h.app);

    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        h.app.mode(),
        &Mode::Input {
            field: Field::ProjectName,
            input: String::new()
        }
    );
    assert!(h.app.is_input_mode());
    type_text(&mut h.app, "Tutor Hub");
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.answer().project_name, "Tutor Hub");

    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Details);

    for text in ["Match students with tutors", "Students"] {
        h.app.handle_key(char_key('j'));
        h.app.handle_key(key(KeyCode::Enter));
        type_text(&mut h.app, text);
        h.app.handle_key(key(KeyCode::Enter));
    }
    assert_eq!(h.app.answer().target_audience, "Students");
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Features);
}

#[test]
fn input_esc_discards_typing() {
    let mut h = harness(scripted());
    to_details(&mut h.app);
    h.app.handle_key(key(KeyCode::Enter));
    type_text(&mut h.app, "Draft");
    h.app.handle_key(key(KeyCode::Backspace));
    h.app.handle_key(key(KeyCode::Esc));
    assert!(matches!(h.app.mode(), Mode::Normal));
    assert!(h.app.answer().project_name.is_empty());
}

#[test]
fn two_features_cannot_advance() {
    let mut h = harness(scripted());
    to_features(&mut h.app);

    add_feature(&mut h.app, "Auth");
    add_feature(&mut h.app, "Dashboard");
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Features);
    assert!(h.app.status_message().unwrap().contains('3'));

    add_feature(&mut h.app, "Search");
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::TechStack);
}

#[test]
fn duplicate_and_blank_features_are_ignored() {
    let mut h = harness(scripted());
    to_features(&mut h.app);
    add_feature(&mut h.app, "Auth");
    add_feature(&mut h.app, "Auth");
    add_feature(&mut h.app, "   ");
    assert_eq!(h.app.answer().core_features, vec!["Auth"]);
}

#[test]
fn features_can_be_removed() {
    let mut h = harness(scripted());
    to_features(&mut h.app);
    add_feature(&mut h.app, "Auth");
    add_feature(&mut h.app, "Dashboard");
    h.app.handle_key(char_key('j'));
    h.app.handle_key(char_key('d'));
    assert_eq!(h.app.answer().core_features, vec!["Auth"]);
}

// ---- Assist calls ----

#[test]
fn guidance_opens_overlay() {
    let mut h = harness(scripted());
    h.app.handle_key(key(KeyCode::Enter));
    h.app.handle_key(char_key('g'));
    assert!(h.app.is_loading(Slot::Guidance));
    settle(&mut h.app);

    assert_eq!(h.app.guidance(), Some(GUIDANCE));
    assert_eq!(h.app.mode(), &Mode::Guidance { scroll: 0 });
    // Asking does not choose the type.
    assert_eq!(h.app.answer().project_type, None);

    h.app.handle_key(key(KeyCode::Esc));
    assert!(matches!(h.app.mode(), Mode::Normal));
}

#[test]
fn suggestions_load_on_entering_features() {
    let mut h = harness(scripted());
    to_features(&mut h.app);
    assert_eq!(
        h.app.suggestions(),
        &["Calendar sync", "Messaging", "Reviews"]
    );

    // Tab to suggestions, add the second one.
    h.app.handle_key(key(KeyCode::Tab));
    h.app.handle_key(char_key('j'));
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.answer().core_features, vec!["Messaging"]);
}

#[test]
fn enhancement_replaces_description_only_when_accepted() {
    let mut h = harness(scripted());
    to_details(&mut h.app);
    fill_details(&mut h.app);

    h.app.handle_key(char_key('e'));
    settle(&mut h.app);
    assert_eq!(h.app.enhanced_description(), Some(ENHANCED));
    h.app.handle_key(char_key('n'));
    assert_eq!(
        h.app.answer().description,
        "Match students with tutors for weekly lessons"
    );

    h.app.handle_key(char_key('e'));
    settle(&mut h.app);
    h.app.handle_key(char_key('y'));
    assert_eq!(h.app.answer().description, ENHANCED);
    assert_eq!(h.app.enhanced_description(), None);
}

#[test]
fn failed_enhancement_keeps_description() {
    let mock = scripted().route_status("Original description", 500, "{}");
    let mut h = harness(mock);
    to_details(&mut h.app);
    fill_details(&mut h.app);

    h.app.handle_key(char_key('e'));
    settle(&mut h.app);
    assert_eq!(h.app.enhanced_description(), None);
    assert_eq!(h.app.status_message(), Some(FALLBACK_ERROR));
    h.app.handle_key(char_key('y'));
    assert_eq!(
        h.app.answer().description,
        "Match students with tutors for weekly lessons"
    );
}

#[test]
fn tech_stack_loads_catalog_and_recommendation() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);

    assert_eq!(h.app.catalog(), Some(&generated_catalog()));
    assert!(!h.app.catalog_from_fallback());
    let advice = h.app.advice().unwrap();
    assert_eq!(advice.explanation, ADVICE);
    // Nothing was chosen yet, so the recommendation is applied.
    assert!(h.app.answer().tech_stack.is_complete());
    assert_eq!(
        Some(&h.app.answer().tech_stack),
        advice.recommended.as_ref()
    );

    let options_call = h
        .mock
        .calls()
        .into_iter()
        .find(|c| c.max_tokens == 2000)
        .unwrap();
    assert_eq!(options_call.temperature, 0.3);
}

#[test]
fn recommendation_does_not_override_choices() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);

    let catalog = generated_catalog();
    let recommended = h.app.answer().tech_stack.frontend.clone();
    let other = catalog
        .frontend
        .options
        .iter()
        .position(|o| o.value != recommended)
        .unwrap();
    h.app.handle_key(key(KeyCode::Home));
    for _ in 0..other {
        h.app.handle_key(char_key('j'));
    }
    h.app.handle_key(key(KeyCode::Enter));
    let chosen = catalog.frontend.options[other].value.clone();
    assert_eq!(h.app.answer().tech_stack.get(TechCategory::Frontend), chosen);

    h.app.handle_key(char_key('r'));
    settle(&mut h.app);
    assert_eq!(h.app.answer().tech_stack.get(TechCategory::Frontend), chosen);
}

#[test]
fn tech_options_fall_back_to_builtin_catalog() {
    let mock = scripted().route_completion("Generate technology stack options", "not json at all");
    let mut h = harness(mock);
    to_tech_stack(&mut h.app);
    assert!(h.app.catalog_from_fallback());
    assert_eq!(
        h.app.catalog(),
        Some(&TechOptionCatalog::fallback(Some(ProjectType::WebApp)))
    );
    assert!(h.app.answer().tech_stack.is_complete());
}

#[test]
fn tech_stack_needs_every_category() {
    let mock = scripted().route_status("Based on this project", 500, "{}");
    let mut h = harness(mock);
    to_tech_stack(&mut h.app);
    assert!(h.app.answer().tech_stack.is_empty());

    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::TechStack);

    for _ in TechCategory::ALL {
        h.app.handle_key(key(KeyCode::Enter));
        h.app.handle_key(char_key('l'));
    }
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Testing);
}

#[test]
fn changing_project_type_clears_stack_and_catalog() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);
    for _ in 0..3 {
        h.app.handle_key(key(KeyCode::PageUp));
    }
    assert_eq!(h.app.step(), WizardStep::ProjectType);
    h.app.handle_key(char_key('j'));
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.answer().project_type, Some(ProjectType::MobileApp));
    assert!(h.app.answer().tech_stack.is_empty());
    assert!(h.app.catalog().is_none());
}

// ---- Generation ----

#[test]
fn full_walkthrough_generates_and_saves() {
    let mut h = harness(scripted());
    to_generate(&mut h.app);

    let answer = h.app.answer();
    assert_eq!(answer.testing.approach, Some(TestingApproach::Basic));
    assert!(answer
        .professional_requirements
        .is_enabled(RequirementFlag::UserAccounts));
    assert_eq!(h.app.specification(), Some(SPEC));

    h.app.handle_key(char_key('s'));
    let path = h.dir.path().join("specs").join("tutor-hub-prompt.txt");
    assert_eq!(h.app.saved_to(), Some(&path));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), SPEC);

    let spec_call = h.mock.calls().into_iter().last().unwrap();
    assert_eq!(spec_call.max_tokens, 3000);
    let user = &spec_call.messages[1].content;
    assert!(user.contains("USER ACCOUNTS"));
    assert!(user.contains("\"projectName\": \"Tutor Hub\""));
}

#[test]
fn failed_generation_is_not_saved() {
    let mock = scripted().route_status("PROJECT DATA", 500, r#"{"error":"boom"}"#);
    let mut h = harness(mock);
    to_generate(&mut h.app);

    assert_eq!(h.app.specification(), None);
    assert_eq!(h.app.specification_error(), Some(FALLBACK_ERROR));
    h.app.handle_key(char_key('s'));
    assert_eq!(h.app.saved_to(), None);
    assert!(!h.dir.path().join("specs").exists());
}

#[test]
fn additional_requirements_add_and_remove() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);
    h.app.handle_key(key(KeyCode::PageDown));
    h.app.handle_key(key(KeyCode::Enter));
    h.app.handle_key(key(KeyCode::PageDown));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::FinalDetails);

    h.app.handle_key(char_key('a'));
    assert!(h.app.is_input_mode());
    type_text(&mut h.app, "Dark mode");
    h.app.handle_key(key(KeyCode::Enter));
    h.app.handle_key(char_key('a'));
    type_text(&mut h.app, "Export to CSV");
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        h.app.answer().additional_requirements,
        vec!["Dark mode", "Export to CSV"]
    );

    h.app.handle_key(char_key('d'));
    assert_eq!(h.app.answer().additional_requirements, vec!["Export to CSV"]);
}

#[test]
fn restart_resets_everything() {
    let mut h = harness(scripted());
    to_generate(&mut h.app);

    h.app.handle_key(char_key('r'));
    assert_eq!(h.app.mode(), &Mode::ConfirmRestart);
    h.app.handle_key(char_key('n'));
    assert_eq!(h.app.step(), WizardStep::Generate);

    h.app.handle_key(char_key('r'));
    h.app.handle_key(char_key('y'));
    assert_eq!(h.app.step(), WizardStep::Welcome);
    assert_eq!(h.app.answer(), &Default::default());
    assert!(h.app.specification().is_none());
    assert!(h.app.suggestions().is_empty());
}

// ---- Stale results ----

#[test]
fn stale_result_is_dropped() {
    let mut h = harness(scripted());
    h.app.apply_result(AssistResult {
        slot: Slot::Guidance,
        generation: 42,
        payload: Payload::Guidance("stale".into()),
    });
    assert_eq!(h.app.guidance(), None);
}

#[test]
fn restart_orphans_in_flight_generation() {
    let mut h = harness(scripted());
    to_generate(&mut h.app);

    // Regenerate, then start over before the result is applied.
    h.app.handle_key(char_key('g'));
    assert!(h.app.is_loading(Slot::Specification));
    h.app.handle_key(char_key('r'));
    h.app.handle_key(char_key('y'));
    assert!(!h.app.needs_polling());

    std::thread::sleep(Duration::from_millis(200));
    h.app.poll_results();
    assert!(h.app.specification().is_none());
}

#[test]
fn unconfigured_gateway_never_calls_out() {
    let mut h = harness_with(GatewayConfig::direct(None), scripted());
    h.app.handle_key(key(KeyCode::Enter));
    h.app.handle_key(char_key('g'));
    settle(&mut h.app);
    assert_eq!(h.app.guidance(), Some(MISSING_CREDENTIAL));
    assert_eq!(h.mock.call_count(), 0);
}

// ---- Revisiting steps ----

#[test]
fn returning_to_generate_unchanged_keeps_specification() {
    let mut h = harness(scripted());
    to_generate(&mut h.app);
    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Generate);
    assert!(!h.app.needs_polling());
    assert_eq!(h.app.specification(), Some(SPEC));
    assert_eq!(prompts_containing(&h, "PROJECT DATA"), 1);
}

#[test]
fn edited_answers_regenerate_specification() {
    let mut h = harness(scripted());
    to_generate(&mut h.app);
    h.app.handle_key(char_key('s'));
    assert!(h.app.saved_to().is_some());

    // Back to professional features and enable sensitive data handling.
    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::ProfessionalFeatures);
    h.app.handle_key(char_key('j'));
    h.app.handle_key(char_key(' '));
    assert!(h
        .app
        .answer()
        .professional_requirements
        .is_enabled(RequirementFlag::SensitiveData));

    h.app.handle_key(key(KeyCode::PageDown));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Generate);
    // The old document is gone before the new one arrives.
    assert_eq!(h.app.specification(), None);
    assert_eq!(h.app.saved_to(), None);
    assert!(h.app.is_loading(Slot::Specification));

    settle(&mut h.app);
    assert_eq!(h.app.specification(), Some(SPEC));
    assert_eq!(prompts_containing(&h, "PROJECT DATA"), 2);
    let latest = h.mock.calls().into_iter().last().unwrap();
    assert!(latest.messages[1].content.contains("SENSITIVE DATA PROTECTION"));
}

#[test]
fn failed_generation_retries_on_return() {
    let mock = scripted().route_status("PROJECT DATA", 500, "{}");
    let mut h = harness(mock);
    to_generate(&mut h.app);
    assert_eq!(h.app.specification_error(), Some(FALLBACK_ERROR));

    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageDown));
    settle(&mut h.app);
    assert_eq!(prompts_containing(&h, "PROJECT DATA"), 2);
}

#[test]
fn changing_project_type_refreshes_suggestions() {
    let mut h = harness(scripted());
    to_features(&mut h.app);
    assert!(!h.app.suggestions().is_empty());

    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::ProjectType);
    h.app.handle_key(char_key('j'));
    h.app.handle_key(key(KeyCode::Enter));
    assert_eq!(h.app.answer().project_type, Some(ProjectType::MobileApp));
    assert!(h.app.suggestions().is_empty());

    h.app.handle_key(key(KeyCode::PageDown));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::Features);
    settle(&mut h.app);
    assert_eq!(prompts_containing(&h, "suggest 8-10"), 2);
    assert_eq!(
        h.app.suggestions(),
        &["Calendar sync", "Messaging", "Reviews"]
    );
    let latest = h.mock.calls().into_iter().last().unwrap();
    assert!(latest.messages[1].content.contains("For a mobile-app project"));
}

#[test]
fn accepted_enhancement_refreshes_suggestions() {
    let mut h = harness(scripted());
    to_features(&mut h.app);
    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::Details);

    h.app.handle_key(char_key('e'));
    settle(&mut h.app);
    h.app.handle_key(char_key('y'));
    assert_eq!(h.app.answer().description, ENHANCED);
    assert!(h.app.suggestions().is_empty());

    h.app.handle_key(key(KeyCode::PageDown));
    settle(&mut h.app);
    assert_eq!(prompts_containing(&h, "suggest 8-10"), 2);
    let latest = h.mock.calls().into_iter().last().unwrap();
    assert!(latest.messages[1].content.contains(ENHANCED));
}

#[test]
fn revisiting_features_unchanged_does_not_refetch() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);
    h.app.handle_key(key(KeyCode::PageUp));
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::TechStack);
    assert!(!h.app.needs_polling());
    assert_eq!(prompts_containing(&h, "suggest 8-10"), 1);
    assert_eq!(prompts_containing(&h, "Based on this project"), 1);
}

#[test]
fn changed_features_refresh_recommendation() {
    let mut h = harness(scripted());
    to_tech_stack(&mut h.app);
    let chosen = h.app.answer().tech_stack.clone();
    assert!(chosen.is_complete());

    h.app.handle_key(key(KeyCode::PageUp));
    assert_eq!(h.app.step(), WizardStep::Features);
    add_feature(&mut h.app, "Group lessons");
    h.app.handle_key(key(KeyCode::PageDown));
    assert_eq!(h.app.step(), WizardStep::TechStack);
    assert!(h.app.is_loading(Slot::Recommendation));
    settle(&mut h.app);

    assert_eq!(prompts_containing(&h, "Based on this project"), 2);
    assert_eq!(prompts_containing(&h, "Generate technology stack options"), 1);
    let latest = h.mock.calls().into_iter().last().unwrap();
    assert!(latest.messages[1].content.contains("Group lessons"));
    assert_eq!(h.app.advice().map(|a| a.explanation.as_str()), Some(ADVICE));
    // Existing choices are kept.
    assert_eq!(h.app.answer().tech_stack, chosen);
}

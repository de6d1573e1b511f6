use std::future::Future;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, ListItem, Paragraph, Wrap};
use tokio::runtime::Handle;
use tracing::{debug, info};
use vibespec_core::step::MIN_FEATURES;
use vibespec_core::{
    AnswerUpdate, ProjectAnswer, ProjectType, RequirementFlag, TechCategory, TechOptionCatalog,
    TechStack, TestingApproach, WizardStep,
};
use vibespec_service::{Assistant, CatalogSource, Completion, StackAdvice};

use crate::components::picker::Picker;
use crate::components::{centered_rect, step_tracker};
use crate::requests::{AssistResult, Payload, RequestSlots, Slot};

/// What the app is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the current step
    Normal,
    /// Typing into a text field
    Input { field: Field, input: String },
    /// Reading project-type guidance
    Guidance { scroll: u16 },
    /// Confirm throwing the answer away
    ConfirmRestart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProjectName,
    Description,
    TargetAudience,
    Feature,
    Requirement,
}

impl Field {
    /// Fields on the details step, in display order.
    pub const DETAILS: &[Field] = &[Field::ProjectName, Field::Description, Field::TargetAudience];

    pub fn label(&self) -> &'static str {
        match self {
            Field::ProjectName => "Project name",
            Field::Description => "Description",
            Field::TargetAudience => "Target audience",
            Field::Feature => "New feature",
            Field::Requirement => "Additional requirement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFocus {
    Selected,
    Suggestions,
}

pub struct App {
    assistant: Assistant,
    runtime: Handle,
    tx: Sender<AssistResult>,
    rx: Receiver<AssistResult>,
    slots: RequestSlots,
    output_dir: PathBuf,
    answer: ProjectAnswer,
    step: WizardStep,
    mode: Mode,
    status_message: Option<String>,
    type_picker: Picker,
    guidance: Option<String>,
    detail_field: usize,
    enhanced: Option<String>,
    feature_focus: FeatureFocus,
    feature_picker: Picker,
    suggestions: Vec<String>,
    suggestion_picker: Picker,
    catalog: Option<TechOptionCatalog>,
    catalog_from_fallback: bool,
    category: usize,
    option_picker: Picker,
    advice: Option<StackAdvice>,
    testing_picker: Picker,
    requirement_picker: Picker,
    extra_picker: Picker,
    specification: Option<String>,
    specification_error: Option<String>,
    spec_scroll: u16,
    saved_to: Option<PathBuf>,
}

impl App {
    /// `runtime` runs the model calls; results come back through
    /// [`App::poll_results`].
    pub fn new(assistant: Assistant, runtime: Handle, output_dir: PathBuf) -> Result<Self> {
        if output_dir.is_file() {
            bail!("output directory {} is a file", output_dir.display());
        }
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            assistant,
            runtime,
            tx,
            rx,
            slots: RequestSlots::default(),
            output_dir,
            answer: ProjectAnswer::default(),
            step: WizardStep::Welcome,
            mode: Mode::Normal,
            status_message: None,
            type_picker: Picker::new(ProjectType::ALL.len()),
            guidance: None,
            detail_field: 0,
            enhanced: None,
            feature_focus: FeatureFocus::Selected,
            feature_picker: Picker::new(0),
            suggestions: Vec::new(),
            suggestion_picker: Picker::new(0),
            catalog: None,
            catalog_from_fallback: false,
            category: 0,
            option_picker: Picker::new(0),
            advice: None,
            testing_picker: Picker::new(TestingApproach::ALL.len()),
            requirement_picker: Picker::new(RequirementFlag::ALL.len()),
            extra_picker: Picker::new(0),
            specification: None,
            specification_error: None,
            spec_scroll: 0,
            saved_to: None,
        })
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn answer(&self) -> &ProjectAnswer {
        &self.answer
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn guidance(&self) -> Option<&str> {
        self.guidance.as_deref()
    }

    pub fn enhanced_description(&self) -> Option<&str> {
        self.enhanced.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn catalog(&self) -> Option<&TechOptionCatalog> {
        self.catalog.as_ref()
    }

    pub fn catalog_from_fallback(&self) -> bool {
        self.catalog_from_fallback
    }

    pub fn advice(&self) -> Option<&StackAdvice> {
        self.advice.as_ref()
    }

    pub fn specification(&self) -> Option<&str> {
        self.specification.as_deref()
    }

    pub fn specification_error(&self) -> Option<&str> {
        self.specification_error.as_deref()
    }

    pub fn saved_to(&self) -> Option<&PathBuf> {
        self.saved_to.as_ref()
    }

    pub fn is_loading(&self, slot: Slot) -> bool {
        self.slots.is_loading(slot)
    }

    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::Input { .. })
    }

    /// True while any model call is outstanding, so the event loop should
    /// poll instead of blocking on input.
    pub fn needs_polling(&self) -> bool {
        self.slots.any_loading()
    }

    // ---- Model calls ----

    fn start<F, Fut>(&mut self, slot: Slot, answer: ProjectAnswer, call: F)
    where
        F: FnOnce(Assistant, ProjectAnswer) -> Fut,
        Fut: Future<Output = Payload> + Send + 'static,
    {
        let generation = self.slots.begin(slot, &answer);
        debug!(?slot, generation, "starting assist call");
        let tx = self.tx.clone();
        let call = call(self.assistant.clone(), answer);
        self.runtime.spawn(async move {
            let payload = call.await;
            // The receiver is gone only when the app has shut down.
            let _ = tx.send(AssistResult {
                slot,
                generation,
                payload,
            });
        });
    }

    fn request_guidance(&mut self, kind: ProjectType) {
        let answer = self.answer.apply(AnswerUpdate::ProjectType(kind));
        self.start(Slot::Guidance, answer, |assistant, answer| async move {
            Payload::Guidance(assistant.guidance(&answer).await)
        });
    }

    fn request_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestion_picker.set_len(0);
        self.start(Slot::Suggestions, self.answer.clone(), |assistant, answer| async move {
            Payload::Suggestions(assistant.suggest_features(&answer).await)
        });
    }

    fn request_enhancement(&mut self) {
        if self.answer.description.trim().is_empty() {
            self.status_message = Some("Write a description first".into());
            return;
        }
        self.enhanced = None;
        self.start(Slot::Enhancement, self.answer.clone(), |assistant, answer| async move {
            Payload::Enhancement(assistant.enhance_description(&answer).await)
        });
    }

    fn request_tech_options(&mut self) {
        self.slots.cancel(Slot::Recommendation);
        self.catalog = None;
        self.advice = None;
        self.start(Slot::TechOptions, self.answer.clone(), |assistant, answer| async move {
            Payload::TechOptions(assistant.tech_options(&answer).await)
        });
    }

    fn request_recommendation(&mut self) {
        let Some(catalog) = self.catalog.clone() else {
            self.status_message = Some("Technology options are still loading".into());
            return;
        };
        self.advice = None;
        self.start(Slot::Recommendation, self.answer.clone(), |assistant, answer| async move {
            Payload::Recommendation(assistant.recommend_stack(&answer, &catalog).await)
        });
    }

    fn request_specification(&mut self) {
        self.specification = None;
        self.specification_error = None;
        self.saved_to = None;
        self.spec_scroll = 0;
        self.start(Slot::Specification, self.answer.clone(), |assistant, answer| async move {
            Payload::Specification(assistant.specification(&answer).await)
        });
    }

    /// Apply every result that has already arrived.
    pub fn poll_results(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.apply_result(result);
        }
    }

    /// Block until nothing is outstanding or `timeout` passes. Returns true
    /// when everything finished.
    pub fn wait_for_results(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.slots.any_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(result) => self.apply_result(result),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    pub fn apply_result(&mut self, result: AssistResult) {
        if !self.slots.finish(result.slot, result.generation) {
            debug!(slot = ?result.slot, generation = result.generation, "dropping stale result");
            return;
        }

        match result.payload {
            Payload::Guidance(text) => {
                self.guidance = Some(text);
                if self.step == WizardStep::ProjectType && self.mode == Mode::Normal {
                    self.mode = Mode::Guidance { scroll: 0 };
                }
            }
            Payload::Suggestions(list) => {
                if list.is_empty() {
                    self.status_message = Some("No feature suggestions available".into());
                }
                self.suggestions = list;
                self.suggestion_picker.set_len(self.suggestions.len());
            }
            Payload::Enhancement(Completion::Text(text)) => {
                self.enhanced = Some(text);
                self.status_message = Some("Enhanced description ready".into());
            }
            Payload::Enhancement(Completion::Fallback(reason)) => {
                self.status_message = Some(reason.message().to_string());
            }
            Payload::TechOptions(outcome) => {
                self.catalog_from_fallback = match outcome.source {
                    CatalogSource::Generated => false,
                    CatalogSource::Fallback(_) => true,
                };
                self.catalog = Some(outcome.catalog);
                self.sync_option_picker();
                if self.step == WizardStep::TechStack {
                    self.request_recommendation();
                }
            }
            Payload::Recommendation(advice) => {
                if let Some(stack) = &advice.recommended {
                    if self.answer.tech_stack.is_empty() {
                        self.answer = self.answer.apply(AnswerUpdate::TechStack(stack.clone()));
                        self.sync_option_picker();
                    }
                }
                self.advice = Some(advice);
            }
            Payload::Specification(Completion::Text(text)) => {
                self.specification = Some(text);
            }
            Payload::Specification(Completion::Fallback(reason)) => {
                self.specification_error = Some(reason.message().to_string());
            }
        }
    }

    // ---- Navigation ----

    fn advance(&mut self) {
        if !self.step.can_advance(&self.answer) {
            self.status_message = Some(blocked_reason(self.step));
            return;
        }
        self.step = self.step.next();
        self.enter_step();
    }

    fn retreat(&mut self) {
        self.step = self.step.previous();
        self.enter_step();
    }

    /// Kick off whatever the new step needs and has not yet fetched for the
    /// current answer.
    fn enter_step(&mut self) {
        self.mode = Mode::Normal;
        match self.step {
            WizardStep::ProjectType => {
                if let Some(kind) = self.answer.project_type {
                    let idx = ProjectType::ALL.iter().position(|t| *t == kind).unwrap_or(0);
                    self.type_picker.select(idx);
                }
            }
            WizardStep::Features => {
                self.feature_picker.set_len(self.answer.core_features.len());
                if !self.slots.is_current(Slot::Suggestions, &self.answer) {
                    self.request_suggestions();
                }
            }
            WizardStep::TechStack => {
                if self.catalog.is_none() {
                    if !self.slots.is_loading(Slot::TechOptions) {
                        self.request_tech_options();
                    }
                } else if !self.slots.is_current(Slot::Recommendation, &self.answer) {
                    self.request_recommendation();
                }
                self.sync_option_picker();
            }
            WizardStep::Generate => {
                let settled = self.specification.is_some()
                    || self.slots.is_loading(Slot::Specification);
                if !settled || !self.slots.is_current(Slot::Specification, &self.answer) {
                    self.request_specification();
                }
            }
            _ => {}
        }
    }

    fn restart(&mut self) {
        self.slots.reset();
        self.answer = ProjectAnswer::default();
        self.step = WizardStep::Welcome;
        self.mode = Mode::Normal;
        self.type_picker = Picker::new(ProjectType::ALL.len());
        self.guidance = None;
        self.detail_field = 0;
        self.enhanced = None;
        self.feature_focus = FeatureFocus::Selected;
        self.feature_picker = Picker::new(0);
        self.suggestions.clear();
        self.suggestion_picker = Picker::new(0);
        self.catalog = None;
        self.catalog_from_fallback = false;
        self.category = 0;
        self.option_picker = Picker::new(0);
        self.advice = None;
        self.testing_picker = Picker::new(TestingApproach::ALL.len());
        self.requirement_picker = Picker::new(RequirementFlag::ALL.len());
        self.extra_picker = Picker::new(0);
        self.specification = None;
        self.specification_error = None;
        self.spec_scroll = 0;
        self.saved_to = None;
        self.status_message = Some("Started a new project".into());
    }

    fn select_project_type(&mut self, kind: ProjectType) {
        if self.answer.project_type != Some(kind) {
            // Options, recommendation and guidance all depend on the type.
            self.slots.cancel(Slot::TechOptions);
            self.slots.cancel(Slot::Recommendation);
            self.slots.cancel(Slot::Guidance);
            self.catalog = None;
            self.advice = None;
            self.guidance = None;
            self.clear_suggestions();
        }
        self.answer = self.answer.apply(AnswerUpdate::ProjectType(kind));
    }

    fn set_description(&mut self, text: String) {
        if text != self.answer.description {
            self.clear_suggestions();
        }
        self.answer = self.answer.apply(AnswerUpdate::Description(text));
    }

    fn clear_suggestions(&mut self) {
        self.slots.cancel(Slot::Suggestions);
        self.suggestions.clear();
        self.suggestion_picker.set_len(0);
    }

    fn current_category(&self) -> TechCategory {
        TechCategory::ALL[self.category % TechCategory::ALL.len()]
    }

    fn sync_option_picker(&mut self) {
        let category = self.current_category();
        let Some(catalog) = &self.catalog else {
            self.option_picker.set_len(0);
            return;
        };
        let options = &catalog.category(category).options;
        let chosen = self.answer.tech_stack.get(category);
        let idx = options.iter().position(|o| o.value == chosen);
        self.option_picker.set_len(options.len());
        if let Some(idx) = idx {
            self.option_picker.select(idx);
        }
    }

    fn save_specification(&mut self) {
        let Some(spec) = self.specification.clone() else {
            self.status_message = Some("Nothing to save yet".into());
            return;
        };
        match self.write_specification(&spec) {
            Ok(path) => {
                info!("saved specification to {}", path.display());
                self.status_message = Some(format!("Saved to {}", path.display()));
                self.saved_to = Some(path);
            }
            Err(e) => self.status_message = Some(format!("Save error: {e:#}")),
        }
    }

    fn write_specification(&self, spec: &str) -> Result<PathBuf> {
        let name = self.answer.spec_file_name()?;
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating {}", self.output_dir.display()))?;
        let path = self.output_dir.join(name);
        std::fs::write(&path, spec).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    // ---- Key handling ----

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        match self.mode.clone() {
            Mode::Normal => self.handle_normal(key),
            Mode::Input { field, input } => self.handle_input(key, field, input),
            Mode::Guidance { scroll } => self.handle_guidance(key, scroll),
            Mode::ConfirmRestart => {
                if key.code == KeyCode::Char('y') {
                    self.restart();
                } else {
                    self.mode = Mode::Normal;
                }
            }
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::PageDown => return self.advance(),
            KeyCode::PageUp => return self.retreat(),
            _ => {}
        }

        match self.step {
            WizardStep::Welcome => {
                if key.code == KeyCode::Enter {
                    self.advance();
                }
            }
            WizardStep::ProjectType => self.handle_project_type(key),
            WizardStep::Details => self.handle_details(key),
            WizardStep::Features => self.handle_features(key),
            WizardStep::TechStack => self.handle_tech_stack(key),
            WizardStep::Testing => {
                if key.code == KeyCode::Enter {
                    if let Some(idx) = self.testing_picker.selected() {
                        let approach = TestingApproach::ALL[idx];
                        self.answer = self.answer.apply(AnswerUpdate::TestingApproach(approach));
                    }
                } else {
                    self.testing_picker.handle_key(key);
                }
            }
            WizardStep::ProfessionalFeatures => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if let Some(idx) = self.requirement_picker.selected() {
                        let flag = RequirementFlag::ALL[idx];
                        self.answer = self.answer.apply(AnswerUpdate::ToggleRequirement(flag));
                    }
                }
                _ => {
                    self.requirement_picker.handle_key(key);
                }
            },
            WizardStep::FinalDetails => match key.code {
                KeyCode::Char('a') => {
                    self.mode = Mode::Input {
                        field: Field::Requirement,
                        input: String::new(),
                    };
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    if let Some(idx) = self.extra_picker.selected() {
                        self.answer = self.answer.apply(AnswerUpdate::RemoveRequirement(idx));
                        self.extra_picker
                            .set_len(self.answer.additional_requirements.len());
                    }
                }
                _ => {
                    self.extra_picker.handle_key(key);
                }
            },
            WizardStep::Generate => self.handle_generate(key),
        }
    }

    fn handle_project_type(&mut self, key: KeyEvent) {
        let highlighted = self.type_picker.selected().map(|i| ProjectType::ALL[i]);
        match key.code {
            KeyCode::Enter => {
                if let Some(kind) = highlighted {
                    self.select_project_type(kind);
                }
            }
            KeyCode::Char('g') => {
                if let Some(kind) = highlighted {
                    self.request_guidance(kind);
                }
            }
            KeyCode::Char('v') => {
                if self.guidance.is_some() {
                    self.mode = Mode::Guidance { scroll: 0 };
                }
            }
            _ => {
                self.type_picker.handle_key(key);
            }
        }
    }

    fn handle_details(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.detail_field = (self.detail_field + 1) % Field::DETAILS.len();
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.detail_field =
                    (self.detail_field + Field::DETAILS.len() - 1) % Field::DETAILS.len();
            }
            KeyCode::Enter => {
                let field = Field::DETAILS[self.detail_field];
                let input = match field {
                    Field::ProjectName => self.answer.project_name.clone(),
                    Field::Description => self.answer.description.clone(),
                    _ => self.answer.target_audience.clone(),
                };
                self.mode = Mode::Input { field, input };
            }
            KeyCode::Char('e') => self.request_enhancement(),
            KeyCode::Char('y') => {
                if let Some(text) = self.enhanced.take() {
                    self.set_description(text);
                    self.status_message = Some("Description updated".into());
                }
            }
            KeyCode::Char('n') => {
                if self.enhanced.take().is_some() {
                    self.status_message = Some("Kept your description".into());
                }
            }
            _ => {}
        }
    }

    fn handle_features(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.feature_focus = match self.feature_focus {
                    FeatureFocus::Selected => FeatureFocus::Suggestions,
                    FeatureFocus::Suggestions => FeatureFocus::Selected,
                };
            }
            KeyCode::Char('a') => {
                self.mode = Mode::Input {
                    field: Field::Feature,
                    input: String::new(),
                };
            }
            KeyCode::Char('s') => self.request_suggestions(),
            KeyCode::Enter if self.feature_focus == FeatureFocus::Suggestions => {
                if let Some(feature) = self
                    .suggestion_picker
                    .selected()
                    .and_then(|i| self.suggestions.get(i))
                {
                    self.answer = self.answer.apply(AnswerUpdate::AddFeature(feature.clone()));
                    self.feature_picker.set_len(self.answer.core_features.len());
                }
            }
            KeyCode::Char('d') | KeyCode::Delete
                if self.feature_focus == FeatureFocus::Selected =>
            {
                if let Some(idx) = self.feature_picker.selected() {
                    self.answer = self.answer.apply(AnswerUpdate::RemoveFeature(idx));
                    self.feature_picker.set_len(self.answer.core_features.len());
                }
            }
            _ => {
                match self.feature_focus {
                    FeatureFocus::Selected => self.feature_picker.handle_key(key),
                    FeatureFocus::Suggestions => self.suggestion_picker.handle_key(key),
                };
            }
        }
    }

    fn handle_tech_stack(&mut self, key: KeyEvent) {
        let count = TechCategory::ALL.len();
        match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.category = (self.category + 1) % count;
                self.sync_option_picker();
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.category = (self.category + count - 1) % count;
                self.sync_option_picker();
            }
            KeyCode::Enter => {
                let category = self.current_category();
                let value = self.catalog.as_ref().and_then(|catalog| {
                    let idx = self.option_picker.selected()?;
                    catalog
                        .category(category)
                        .options
                        .get(idx)
                        .map(|o| o.value.clone())
                });
                if let Some(value) = value {
                    self.answer = self.answer.apply(AnswerUpdate::TechChoice(category, value));
                }
            }
            KeyCode::Char('r') => self.request_recommendation(),
            KeyCode::Char('o') => self.request_tech_options(),
            _ => {
                self.option_picker.handle_key(key);
            }
        }
    }

    fn handle_generate(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.spec_scroll = self.spec_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.spec_scroll = self.spec_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => self.request_specification(),
            KeyCode::Char('s') => self.save_specification(),
            KeyCode::Char('r') => self.mode = Mode::ConfirmRestart,
            _ => {}
        }
    }

    fn handle_input(&mut self, key: KeyEvent, field: Field, mut input: String) {
        match key.code {
            KeyCode::Enter => {
                let update = match field {
                    Field::ProjectName => AnswerUpdate::ProjectName(input),
                    Field::Description => {
                        self.set_description(input);
                        self.mode = Mode::Normal;
                        return;
                    }
                    Field::TargetAudience => AnswerUpdate::TargetAudience(input),
                    Field::Feature => AnswerUpdate::AddFeature(input),
                    Field::Requirement => AnswerUpdate::AddRequirement(input),
                };
                self.answer = self.answer.apply(update);
                self.feature_picker.set_len(self.answer.core_features.len());
                self.extra_picker
                    .set_len(self.answer.additional_requirements.len());
                self.mode = Mode::Normal;
            }
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                self.mode = Mode::Input { field, input };
            }
            KeyCode::Char(c) => {
                input.push(c);
                self.mode = Mode::Input { field, input };
            }
            _ => {}
        }
    }

    fn handle_guidance(&mut self, key: KeyEvent, scroll: u16) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Char('j') | KeyCode::Down => {
                self.mode = Mode::Guidance {
                    scroll: scroll.saturating_add(1),
                };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.mode = Mode::Guidance {
                    scroll: scroll.saturating_sub(1),
                };
            }
            _ => {}
        }
    }

    // ---- Rendering ----

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_title_bar(frame, layout[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(layout[1]);
        step_tracker::render(frame, body[0], self.step, &self.answer);

        match self.step {
            WizardStep::Welcome => self.render_welcome(frame, body[1]),
            WizardStep::ProjectType => self.render_project_type(frame, body[1]),
            WizardStep::Details => self.render_details(frame, body[1]),
            WizardStep::Features => self.render_features(frame, body[1]),
            WizardStep::TechStack => self.render_tech_stack(frame, body[1]),
            WizardStep::Testing => self.render_testing(frame, body[1]),
            WizardStep::ProfessionalFeatures => self.render_requirements(frame, body[1]),
            WizardStep::FinalDetails => self.render_final_details(frame, body[1]),
            WizardStep::Generate => self.render_generate(frame, body[1]),
        }

        self.render_status_bar(frame, layout[2]);

        // Overlays
        match &self.mode {
            Mode::Normal => {}
            Mode::Input { field, input } => {
                self.render_input_bar(frame, &format!("{}: ", field.label()), input, area)
            }
            Mode::Guidance { scroll } => {
                let kind = self
                    .type_picker
                    .selected()
                    .map(|i| ProjectType::ALL[i].display_name())
                    .unwrap_or("Project");
                let text = self.guidance.as_deref().unwrap_or_default();
                self.render_popup_text(frame, &format!(" About: {kind} "), text, *scroll, area)
            }
            Mode::ConfirmRestart => self.render_confirm_restart(frame, area),
        }
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" vibespec ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(
                format!(
                    "Step {}/{}: {}",
                    self.step.index() + 1,
                    WizardStep::ALL.len(),
                    self.step.display_name()
                ),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if !self.answer.project_name.trim().is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.answer.project_name.trim(),
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref msg) = self.status_message {
            let line = Line::from(Span::styled(
                format!(" {msg}"),
                Style::default().fg(Color::Green),
            ));
            frame.render_widget(line, area);
            return;
        }

        if let Some(slot) = self.slots.loading().next() {
            let line = Line::from(Span::styled(
                format!(" {}", slot.loading_label()),
                Style::default().fg(Color::Yellow),
            ));
            frame.render_widget(line, area);
            return;
        }

        let mut hints = match &self.mode {
            Mode::Input { .. } => vec![("Enter", "save"), ("Esc", "cancel")],
            Mode::Guidance { .. } => vec![("j/k", "scroll"), ("Esc", "close")],
            Mode::ConfirmRestart => vec![("y", "start over"), ("any", "cancel")],
            Mode::Normal => match self.step {
                WizardStep::Welcome => vec![("Enter", "start")],
                WizardStep::ProjectType => vec![
                    ("j/k", "nav"),
                    ("Enter", "select"),
                    ("g", "what is this?"),
                    ("v", "view answer"),
                ],
                WizardStep::Details => vec![
                    ("j/k", "field"),
                    ("Enter", "edit"),
                    ("e", "enhance"),
                    ("y/n", "accept/discard"),
                ],
                WizardStep::Features => vec![
                    ("Tab", "focus"),
                    ("a", "add"),
                    ("Enter", "add suggestion"),
                    ("d", "remove"),
                    ("s", "suggest"),
                ],
                WizardStep::TechStack => vec![
                    ("h/l", "category"),
                    ("j/k", "nav"),
                    ("Enter", "choose"),
                    ("r", "recommend"),
                    ("o", "reload"),
                ],
                WizardStep::Testing => vec![("j/k", "nav"), ("Enter", "choose")],
                WizardStep::ProfessionalFeatures => vec![("j/k", "nav"), ("Space", "toggle")],
                WizardStep::FinalDetails => vec![("a", "add"), ("d", "remove")],
                WizardStep::Generate => vec![
                    ("j/k", "scroll"),
                    ("s", "save"),
                    ("g", "regenerate"),
                    ("r", "start over"),
                ],
            },
        };
        if self.mode == Mode::Normal {
            if self.step != WizardStep::Welcome {
                hints.push(("PgUp", "back"));
            }
            if self.step != WizardStep::Generate {
                hints.push(("PgDn", "next"));
            }
            hints.push(("q", "quit"));
        }

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Yellow).bold()),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();

        frame.render_widget(Line::from(spans), area);
    }

    fn render_input_bar(&self, frame: &mut Frame, label: &str, input: &str, area: Rect) {
        let input_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(3),
            width: area.width,
            height: 3,
        };
        frame.render_widget(Clear, input_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(label.to_string());
        frame.render_widget(Paragraph::new(input).block(block), input_area);
    }

    fn render_popup_text(&self, frame: &mut Frame, title: &str, text: &str, scroll: u16, area: Rect) {
        let popup = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, popup);
    }

    fn render_confirm_restart(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(40, 20, area);
        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(" Start over? ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        let text = "All answers and the generated specification will be discarded.\n\ny to confirm, any other key to cancel.";
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            popup,
        );
    }

    fn panel(title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
    }

    fn render_welcome(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Turn a project idea into a build-ready specification.",
                Style::default().bold(),
            )),
            Line::raw(""),
            Line::raw("Answer a few questions about what you want to build. Along the way the"),
            Line::raw("assistant can explain project types, suggest features, polish your"),
            Line::raw("description and recommend a technology stack."),
            Line::raw(""),
            Line::raw("The last step generates a detailed specification you can hand to an AI"),
            Line::raw("coding tool, and save as a text file."),
            Line::raw(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("Enter", Style::default().fg(Color::Yellow).bold()),
                Span::raw(" to begin."),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(Self::panel("Welcome"))
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_project_type(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let items: Vec<ListItem> = ProjectType::ALL
            .iter()
            .map(|kind| {
                let marker = if self.answer.project_type == Some(*kind) {
                    "● "
                } else {
                    "○ "
                };
                ListItem::new(format!("{marker}{}", kind.display_name()))
            })
            .collect();
        self.type_picker
            .render(frame, chunks[0], " What are you building? ", items, true);

        let mut lines = Vec::new();
        if let Some(kind) = self.type_picker.selected().map(|i| ProjectType::ALL[i]) {
            lines.push(Line::from(Span::styled(
                kind.display_name(),
                Style::default().bold().fg(Color::Yellow),
            )));
            lines.push(Line::raw(kind.description()));
            lines.push(Line::raw(""));
        }
        if self.slots.is_loading(Slot::Guidance) {
            lines.push(Line::styled(
                Slot::Guidance.loading_label(),
                Style::default().fg(Color::DarkGray),
            ));
        } else if let Some(text) = &self.guidance {
            lines.extend(text.lines().map(Line::raw));
        } else {
            lines.push(Line::styled(
                "Press g to ask what this kind of project involves.",
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Self::panel("About"))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }

    fn render_details(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(7),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let values = [
            &self.answer.project_name,
            &self.answer.description,
            &self.answer.target_audience,
        ];
        for (i, (field, value)) in Field::DETAILS.iter().zip(values).enumerate() {
            let border = if i == self.detail_field {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default()
                .title(format!(" {} ", field.label()))
                .borders(Borders::ALL)
                .border_style(border);
            frame.render_widget(
                Paragraph::new(value.as_str())
                    .block(block)
                    .wrap(Wrap { trim: false }),
                chunks[i],
            );
        }

        let enhancement: Vec<Line> = if self.slots.is_loading(Slot::Enhancement) {
            vec![Line::styled(
                Slot::Enhancement.loading_label(),
                Style::default().fg(Color::DarkGray),
            )]
        } else if let Some(text) = &self.enhanced {
            let mut lines: Vec<Line> = text.lines().map(Line::raw).collect();
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "y to use this description, n to keep yours",
                Style::default().fg(Color::Yellow),
            ));
            lines
        } else {
            vec![Line::styled(
                "Press e to have the assistant expand your description.",
                Style::default().fg(Color::DarkGray),
            )]
        };
        frame.render_widget(
            Paragraph::new(enhancement)
                .block(Self::panel("Enhanced description"))
                .wrap(Wrap { trim: false }),
            chunks[3],
        );
    }

    fn render_features(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let selected: Vec<ListItem> = self
            .answer
            .core_features
            .iter()
            .map(|f| ListItem::new(f.as_str()))
            .collect();
        let count = self.answer.core_features.len();
        let title = format!(" Your features ({count}, at least {MIN_FEATURES}) ");
        self.feature_picker.render(
            frame,
            chunks[0],
            &title,
            selected,
            self.feature_focus == FeatureFocus::Selected,
        );

        let focused = self.feature_focus == FeatureFocus::Suggestions;
        if self.suggestions.is_empty() {
            let text = if self.slots.is_loading(Slot::Suggestions) {
                Slot::Suggestions.loading_label()
            } else {
                "No suggestions yet. Press s to ask for some."
            };
            frame.render_widget(
                Paragraph::new(Line::styled(text, Style::default().fg(Color::DarkGray)))
                    .block(Self::panel("Suggestions"))
                    .wrap(Wrap { trim: false }),
                chunks[1],
            );
            return;
        }
        let suggested: Vec<ListItem> = self
            .suggestions
            .iter()
            .map(|s| {
                if self.answer.has_feature(s) {
                    ListItem::new(format!("✓ {s}")).style(Style::default().fg(Color::DarkGray))
                } else {
                    ListItem::new(format!("+ {s}"))
                }
            })
            .collect();
        self.suggestion_picker
            .render(frame, chunks[1], " Suggestions ", suggested, focused);
    }

    fn render_tech_stack(&self, frame: &mut Frame, area: Rect) {
        let Some(catalog) = &self.catalog else {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    Slot::TechOptions.loading_label(),
                    Style::default().fg(Color::DarkGray),
                ))
                .block(Self::panel("Tech Stack")),
                area,
            );
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0), Constraint::Length(7)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let current = self.current_category();
        let recommended = self.advice.as_ref().and_then(|a| a.recommended.as_ref());

        let summary: Vec<Line> = TechCategory::ALL
            .iter()
            .map(|category| {
                let style = if *category == current {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default()
                };
                let chosen = self.answer.tech_stack.get(*category);
                let label = catalog
                    .find(*category, chosen)
                    .map(|o| o.label.as_str())
                    .unwrap_or(if chosen.is_empty() { "-" } else { chosen });
                Line::from(vec![
                    Span::styled(format!("{:<10}", category.display_name()), style),
                    Span::raw(label.to_string()),
                ])
            })
            .collect();
        let title = if self.catalog_from_fallback {
            "Your stack (built-in options)"
        } else {
            "Your stack"
        };
        frame.render_widget(Paragraph::new(summary).block(Self::panel(title)), rows[0]);

        let options = &catalog.category(current).options;
        let chosen = self.answer.tech_stack.get(current);
        let items: Vec<ListItem> = options
            .iter()
            .map(|option| {
                let mut spans = vec![
                    Span::raw(if option.value == chosen { "● " } else { "○ " }),
                    Span::raw(option.label.as_str()),
                    Span::styled(
                        format!(" ({})", option.difficulty),
                        Style::default().fg(Color::DarkGray),
                    ),
                ];
                if recommended.is_some_and(|r| r.get(current) == option.value) {
                    spans.push(Span::styled(" ★ recommended", Style::default().fg(Color::Green)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        let title = format!(" {} ", catalog.category(current).title);
        let title = if title.trim().is_empty() {
            format!(" {} ", current.display_name())
        } else {
            title
        };
        self.option_picker.render(frame, columns[0], &title, items, true);

        let mut detail = Vec::new();
        if let Some(option) = self.option_picker.selected().and_then(|i| options.get(i)) {
            detail.push(Line::styled(option.label.as_str(), Style::default().bold()));
            detail.push(Line::raw(option.description.as_str()));
            detail.push(Line::raw(""));
            detail.extend(option.pros.iter().map(|p| Line::raw(format!("+ {p}"))));
        }
        frame.render_widget(
            Paragraph::new(detail)
                .block(Self::panel("Details"))
                .wrap(Wrap { trim: false }),
            columns[1],
        );

        let advice: Vec<Line> = if self.slots.is_loading(Slot::Recommendation) {
            vec![Line::styled(
                Slot::Recommendation.loading_label(),
                Style::default().fg(Color::DarkGray),
            )]
        } else if let Some(advice) = &self.advice {
            advice.explanation.lines().map(Line::raw).collect()
        } else {
            vec![Line::styled(
                "Press r for a recommendation.",
                Style::default().fg(Color::DarkGray),
            )]
        };
        frame.render_widget(
            Paragraph::new(advice)
                .block(Self::panel("Recommendation"))
                .wrap(Wrap { trim: false }),
            rows[2],
        );
    }

    fn render_testing(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items: Vec<ListItem> = TestingApproach::ALL
            .iter()
            .map(|approach| {
                let marker = if self.answer.testing.approach == Some(*approach) {
                    "● "
                } else {
                    "○ "
                };
                ListItem::new(format!("{marker}{}", approach.display_name()))
            })
            .collect();
        self.testing_picker
            .render(frame, chunks[0], " Testing approach ", items, true);

        let mut lines = Vec::new();
        if let Some(approach) = self.testing_picker.selected().map(|i| TestingApproach::ALL[i]) {
            lines.push(Line::styled(approach.display_name(), Style::default().bold()));
            lines.push(Line::raw(approach.description()));
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("Recommended for: ", Style::default().fg(Color::Yellow)),
                Span::raw(approach.recommended_for()),
            ]));
            lines.push(Line::raw(""));
            lines.extend(approach.tools().iter().map(|t| Line::raw(format!("• {t}"))));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Self::panel("Details"))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }

    fn render_requirements(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let reqs = &self.answer.professional_requirements;
        let items: Vec<ListItem> = RequirementFlag::ALL
            .iter()
            .map(|flag| {
                let check = if reqs.is_enabled(*flag) { "[x] " } else { "[ ] " };
                ListItem::new(format!("{check}{}", flag.label()))
            })
            .collect();
        let title = format!(" Professional features ({} selected) ", reqs.selected_count());
        self.requirement_picker
            .render(frame, chunks[0], &title, items, true);

        let mut lines = Vec::new();
        if let Some(flag) = self.requirement_picker.selected().map(|i| RequirementFlag::ALL[i]) {
            lines.push(Line::styled(flag.label(), Style::default().bold()));
            lines.push(Line::raw(flag.description()));
            lines.push(Line::raw(""));
            lines.push(Line::styled("What this includes:", Style::default().fg(Color::Yellow)));
            lines.extend(flag.implications().iter().map(|i| Line::raw(format!("• {i}"))));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Self::panel("Details"))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }

    fn render_final_details(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let items: Vec<ListItem> = self
            .answer
            .additional_requirements
            .iter()
            .map(|r| ListItem::new(r.as_str()))
            .collect();
        self.extra_picker
            .render(frame, chunks[0], " Additional requirements ", items, true);

        let answer = &self.answer;
        let stack = &answer.tech_stack;
        let summary = vec![
            summary_line(
                "Type",
                answer.project_type.map(|t| t.display_name()).unwrap_or("-"),
            ),
            summary_line("Name", &answer.project_name),
            summary_line("Audience", &answer.target_audience),
            summary_line("Features", &answer.core_features.join(", ")),
            summary_line("Stack", &stack_summary(stack)),
            summary_line(
                "Testing",
                answer
                    .testing
                    .approach
                    .map(|a| a.display_name())
                    .unwrap_or("-"),
            ),
            summary_line(
                "Extras",
                &format!(
                    "{} professional features",
                    answer.professional_requirements.selected_count()
                ),
            ),
        ];
        frame.render_widget(
            Paragraph::new(summary)
                .block(Self::panel("Summary"))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }

    fn render_generate(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.saved_to {
            Some(path) => format!("Specification (saved to {})", path.display()),
            None => "Specification".to_string(),
        };
        let paragraph = if self.slots.is_loading(Slot::Specification) {
            Paragraph::new(Line::styled(
                Slot::Specification.loading_label(),
                Style::default().fg(Color::DarkGray),
            ))
        } else if let Some(spec) = &self.specification {
            Paragraph::new(spec.as_str()).scroll((self.spec_scroll, 0))
        } else if let Some(err) = &self.specification_error {
            Paragraph::new(vec![
                Line::styled(err.as_str(), Style::default().fg(Color::Red)),
                Line::raw(""),
                Line::raw("Press g to try again."),
            ])
        } else {
            Paragraph::new("Press g to generate the specification.")
        };
        frame.render_widget(
            paragraph
                .block(Self::panel(&title))
                .wrap(Wrap { trim: false }),
            area,
        );
    }
}

fn blocked_reason(step: WizardStep) -> String {
    match step {
        WizardStep::ProjectType => "Choose a project type to continue".into(),
        WizardStep::Details => {
            "Project name, description and target audience are all required".into()
        }
        WizardStep::Features => format!("Add at least {MIN_FEATURES} features to continue"),
        WizardStep::TechStack => "Choose an option in every category to continue".into(),
        WizardStep::Testing => "Choose a testing approach to continue".into(),
        WizardStep::Generate => "This is the last step".into(),
        _ => String::new(),
    }
}

fn summary_line(label: &str, value: &str) -> Line<'static> {
    let value = if value.trim().is_empty() { "-" } else { value };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::Yellow)),
        Span::raw(value.to_string()),
    ])
}

fn stack_summary(stack: &TechStack) -> String {
    if stack.is_empty() {
        return "-".into();
    }
    TechCategory::ALL
        .iter()
        .map(|c| stack.get(*c))
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" / ")
}

use vibespec_core::ProjectAnswer;
use vibespec_service::{CatalogOutcome, Completion, StackAdvice};

/// The wizard triggers that call the model. Each owns one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Guidance,
    Suggestions,
    Enhancement,
    TechOptions,
    Recommendation,
    Specification,
}

impl Slot {
    pub const ALL: &[Slot] = &[
        Slot::Guidance,
        Slot::Suggestions,
        Slot::Enhancement,
        Slot::TechOptions,
        Slot::Recommendation,
        Slot::Specification,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn loading_label(self) -> &'static str {
        match self {
            Slot::Guidance => "Asking about this project type...",
            Slot::Suggestions => "Suggesting features...",
            Slot::Enhancement => "Enhancing description...",
            Slot::TechOptions => "Loading technology options...",
            Slot::Recommendation => "Getting a stack recommendation...",
            Slot::Specification => "Generating specification...",
        }
    }

    /// The part of `answer` this slot's prompt reads. Two answers with the
    /// same basis produce the same request.
    pub fn basis(self, answer: &ProjectAnswer) -> ProjectAnswer {
        let base = ProjectAnswer {
            project_type: answer.project_type,
            ..Default::default()
        };
        match self {
            Slot::Guidance | Slot::TechOptions => base,
            Slot::Suggestions | Slot::Enhancement => ProjectAnswer {
                project_name: answer.project_name.clone(),
                description: answer.description.clone(),
                ..base
            },
            Slot::Recommendation => ProjectAnswer {
                project_name: answer.project_name.clone(),
                description: answer.description.clone(),
                core_features: answer.core_features.clone(),
                ..base
            },
            Slot::Specification => answer.clone(),
        }
    }
}

/// What a finished call produced.
#[derive(Debug, Clone)]
pub enum Payload {
    Guidance(String),
    Suggestions(Vec<String>),
    Enhancement(Completion),
    TechOptions(CatalogOutcome),
    Recommendation(StackAdvice),
    Specification(Completion),
}

/// A finished call tagged with the generation it was started under.
#[derive(Debug, Clone)]
pub struct AssistResult {
    pub slot: Slot,
    pub generation: u64,
    pub payload: Payload,
}

#[derive(Debug, Clone, Default)]
struct SlotState {
    generation: u64,
    outstanding: bool,
    basis: Option<ProjectAnswer>,
}

/// Generation counters for every slot.
///
/// Starting a request bumps the slot's generation. A result is accepted only
/// while its generation is still the latest, so an older response arriving
/// after a newer request was started is dropped. Each slot also remembers
/// the answer basis of its latest request so callers can tell when a result
/// no longer reflects the current answer.
#[derive(Debug, Default)]
pub struct RequestSlots {
    slots: [SlotState; 6],
}

impl RequestSlots {
    pub fn begin(&mut self, slot: Slot, answer: &ProjectAnswer) -> u64 {
        let state = &mut self.slots[slot.index()];
        state.generation += 1;
        state.outstanding = true;
        state.basis = Some(slot.basis(answer));
        state.generation
    }

    /// Whether the latest request for `slot`, finished or not, was made for
    /// the same basis as `answer`.
    pub fn is_current(&self, slot: Slot, answer: &ProjectAnswer) -> bool {
        self.slots[slot.index()].basis.as_ref() == Some(&slot.basis(answer))
    }

    /// Mark `generation` finished. Returns false for a stale result.
    pub fn finish(&mut self, slot: Slot, generation: u64) -> bool {
        let state = &mut self.slots[slot.index()];
        if state.generation != generation || !state.outstanding {
            return false;
        }
        state.outstanding = false;
        true
    }

    pub fn is_loading(&self, slot: Slot) -> bool {
        self.slots[slot.index()].outstanding
    }

    pub fn any_loading(&self) -> bool {
        self.slots.iter().any(|s| s.outstanding)
    }

    pub fn loading(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::ALL.iter().copied().filter(|s| self.is_loading(*s))
    }

    /// Orphan whatever is in flight for `slot`.
    pub fn cancel(&mut self, slot: Slot) {
        let state = &mut self.slots[slot.index()];
        state.generation += 1;
        state.outstanding = false;
        state.basis = None;
    }

    /// Orphan everything in flight. Generations keep counting so results
    /// from before the reset can never match again.
    pub fn reset(&mut self) {
        for state in &mut self.slots {
            state.generation += 1;
            state.outstanding = false;
            state.basis = None;
        }
    }
}

//! Loop state for one question-to-answer exchange
//!
//! Both loop variants drive the same pure transition, so the stopping
//! rules live in one place.

/// State of a `ReAct` exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting on the model for round `iteration` (1-based)
    Running { iteration: usize },
    /// The model replied without an action (terminal)
    Answered,
    /// Every round in the budget ended with a tool call (terminal)
    BudgetExhausted,
}

/// What happened in the round that just finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No action was parsed; the reply is the final answer
    Answered,
    /// A tool ran and its observation was recorded
    Observed,
}

/// Why an exchange stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Answered,
    BudgetExhausted,
}

impl LoopState {
    /// Initial state for a budget of `max_iterations` rounds
    pub fn start(max_iterations: usize) -> Self {
        if max_iterations == 0 {
            LoopState::BudgetExhausted
        } else {
            LoopState::Running { iteration: 1 }
        }
    }

    /// Pure transition. Terminal states absorb every step.
    #[must_use]
    pub fn advance(self, step: Step, max_iterations: usize) -> Self {
        match (self, step) {
            (LoopState::Running { .. }, Step::Answered) => LoopState::Answered,
            (LoopState::Running { iteration }, Step::Observed) if iteration >= max_iterations => {
                LoopState::BudgetExhausted
            }
            (LoopState::Running { iteration }, Step::Observed) => LoopState::Running {
                iteration: iteration + 1,
            },
            (terminal, _) => terminal,
        }
    }

    pub fn exit_reason(self) -> Option<ExitReason> {
        match self {
            LoopState::Running { .. } => None,
            LoopState::Answered => Some(ExitReason::Answered),
            LoopState::BudgetExhausted => Some(ExitReason::BudgetExhausted),
        }
    }
}

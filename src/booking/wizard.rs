//! Step wizard — sequencing and continue-gating over the booking flow.
//!
//! Steps form a strictly linear sequence; `back` always moves one step
//! left, while `advance` is gated on per-step validation and decides
//! whether the questions step can be skipped.

use serde::{Deserialize, Serialize};

use crate::booking::questions;
use crate::booking::state::BookingState;

/// One step of the booking flow, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Details,
    Participants,
    #[serde(rename = "datetime")]
    DateTime,
    Contact,
    Options,
    Questions,
    Review,
}

impl Step {
    /// All steps in wizard order. Array index drives back/forward moves.
    pub const ALL: [Step; 7] = [
        Step::Details,
        Step::Participants,
        Step::DateTime,
        Step::Contact,
        Step::Options,
        Step::Questions,
        Step::Review,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Whether the continue button is enabled on this step.
    pub fn can_continue(self, state: &BookingState) -> bool {
        match self {
            Step::Details => true,
            Step::Participants => state.has_participants(),
            Step::DateTime => state.date.is_some() && state.time.is_some(),
            Step::Contact => state.contact.is_complete(),
            Step::Options => true,
            Step::Questions => questions::checkout_questions_complete(state),
            Step::Review => state.agreed_to_cancellation_policy,
        }
    }

    /// The step that follows this one for the given state.
    ///
    /// `Options` skips straight to `Review` when no applicable
    /// required-before-checkout question is left unanswered; the same
    /// completeness check gates `Questions → Review`, so the two can never
    /// disagree.
    pub fn next(self, state: &BookingState) -> Option<Step> {
        match self {
            Step::Options => {
                if questions::checkout_questions_complete(state) {
                    Some(Step::Review)
                } else {
                    Some(Step::Questions)
                }
            }
            Step::Review => None,
            _ => Self::ALL.get(self.index() + 1).copied(),
        }
    }

    /// One step left; `Details` stays put.
    pub fn prev(self) -> Step {
        match self.index() {
            0 => self,
            i => Self::ALL[i - 1],
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Step::Details => "details",
            Step::Participants => "participants",
            Step::DateTime => "datetime",
            Step::Contact => "contact",
            Step::Options => "options",
            Step::Questions => "questions",
            Step::Review => "review",
        };
        write!(f, "{s}")
    }
}

/// Tracks the current step of one booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wizard {
    step: Step,
}

impl Wizard {
    /// A fresh wizard entered at `Details`.
    pub fn new() -> Self {
        Self {
            step: Step::Details,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Move forward if the current step's gate holds. Returns the step the
    /// wizard is on afterwards.
    pub fn advance(&mut self, state: &BookingState) -> Step {
        if self.step.can_continue(state)
            && let Some(next) = self.step.next(state)
        {
            self.step = next;
        }
        self.step
    }

    /// Move exactly one step back; no-op at `Details`.
    pub fn back(&mut self) -> Step {
        self.step = self.step.prev();
        self.step
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

use crate::draft::BookingDraft;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Wizard steps, in order, followed by the terminal confirmation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Step {
    Destination,
    SeatClass,
    Accommodation,
    Checkout,
    Confirmed,
}

impl Step {
    pub const WIZARD: [Step; 4] = [Step::Destination, Step::SeatClass, Step::Accommodation, Step::Checkout];

    /// Position in the wizard; `None` once confirmed
    pub fn index(&self) -> Option<usize> {
        match self {
            Step::Destination => Some(0),
            Step::SeatClass => Some(1),
            Step::Accommodation => Some(2),
            Step::Checkout => Some(3),
            Step::Confirmed => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Destination => "Select Destination",
            Step::SeatClass => "Choose Seat Class",
            Step::Accommodation => "Select Accommodation",
            Step::Checkout => "Review & Checkout",
            Step::Confirmed => "Booking Confirmed",
        }
    }

    fn next(&self) -> Option<Step> {
        match self {
            Step::Destination => Some(Step::SeatClass),
            Step::SeatClass => Some(Step::Accommodation),
            Step::Accommodation => Some(Step::Checkout),
            Step::Checkout | Step::Confirmed => None,
        }
    }

    fn previous(&self) -> Option<Step> {
        match self {
            Step::SeatClass => Some(Step::Destination),
            Step::Accommodation => Some(Step::SeatClass),
            Step::Checkout => Some(Step::Accommodation),
            Step::Destination | Step::Confirmed => None,
        }
    }

    /// What the draft must hold before moving past this step
    pub fn precondition_met(&self, draft: &BookingDraft) -> bool {
        match self {
            Step::Destination => draft.destination().is_some(),
            Step::SeatClass => draft.seat_class().is_some(),
            Step::Accommodation => draft.accommodation().is_some(),
            Step::Checkout => true,
            Step::Confirmed => false,
        }
    }
}

/// Transition direction, used by the view to pick an animation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Forward,
    Backward,
}

/// Current step pointer plus the gating rules between steps.
///
/// Calls that fail their precondition return `false` and change nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSequencer {
    current: Step,
    direction: Direction,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self {
            current: Step::Destination,
            direction: Direction::Forward,
        }
    }

    pub fn step(&self) -> Step {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn can_advance(&self, draft: &BookingDraft) -> bool {
        self.current.next().is_some() && self.current.precondition_met(draft)
    }

    pub fn can_retreat(&self) -> bool {
        self.current.previous().is_some()
    }

    /// Checkout with a complete, positively priced draft
    pub fn can_submit(&self, draft: &BookingDraft) -> bool {
        self.current == Step::Checkout
            && draft.is_complete()
            && draft.nights() >= 1
            && draft.total_price() > 0
    }

    pub fn advance(&mut self, draft: &BookingDraft) -> bool {
        if !self.can_advance(draft) {
            debug!("Advance from {:?} rejected", self.current);
            return false;
        }
        if let Some(next) = self.current.next() {
            self.current = next;
            self.direction = Direction::Forward;
        }
        true
    }

    pub fn retreat(&mut self) -> bool {
        match self.current.previous() {
            Some(previous) => {
                self.current = previous;
                self.direction = Direction::Backward;
                true
            }
            None => {
                debug!("Retreat from {:?} rejected", self.current);
                false
            }
        }
    }

    /// Checkout → Confirmed, after the booking service accepted the draft
    pub(crate) fn confirm(&mut self) -> bool {
        if self.current != Step::Checkout {
            return false;
        }
        self.current = Step::Confirmed;
        self.direction = Direction::Forward;
        true
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}

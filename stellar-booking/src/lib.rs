pub mod models;
pub mod draft;
pub mod sequencer;
pub mod catalog_state;
pub mod gateway;
pub mod flow;

pub use models::{BookingConfirmation, BookingSnapshot, FlowRules, RulesError};
pub use draft::{BookingDraft, DraftError, DraftField};
pub use sequencer::{Direction, Step, StepSequencer};
pub use catalog_state::CatalogState;
pub use gateway::{SubmissionError, SubmissionGateway};
pub use flow::{BookingFlow, ControlState, FlowSettings, SubmissionStatus};

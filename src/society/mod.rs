//! The society: two agents bound to one task, the per-round step protocol,
//! and the bounded drivers that loop it.

pub mod driver;
pub mod prompts;
pub mod session;
pub mod types;

pub use driver::{arun_society, run_society, DriverConfig, RunId};
pub use prompts::SocietyPrompts;
pub use session::{AnswerFormat, Society, SocietyBuilder};
pub use types::{SocietyRun, StepOutcome, TranscriptEntry};

//! Tandem — turn-driven two-agent task solving.
//!
//! Coordinates an instructor agent (decomposes the overall task one
//! instruction at a time and judges completion) and a solver agent (executes
//! instructions and produces the final answer) through a bounded round loop
//! with strict turn order, message augmentation, sentinel-based termination,
//! and token accounting. The language-model call itself is a collaborator
//! concern: anything implementing [`agent::ChatAgent`] can play either role.
//!
//! # Quick Start
//!
//! ```no_run
//! use tandem::prelude::*;
//!
//! struct Scripted(RoleAssignment);
//!
//! #[async_trait::async_trait]
//! impl ChatAgent for Scripted {
//!     fn step(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
//!         let text = format!("Solution: {}", message.content);
//!         Ok(AgentResponse::of(ChatMessage::new(
//!             self.0.kind,
//!             &self.0.role_name,
//!             text,
//!         )))
//!     }
//!
//!     async fn astep(&mut self, message: &ChatMessage) -> Result<AgentResponse> {
//!         self.step(message)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut society = Society::builder("What is 2 + 2?")
//!         .build(|role| Box::new(Scripted(role)), |role| Box::new(Scripted(role)));
//!     let run = run_society(&mut society, &DriverConfig::default())?;
//!     println!("{}", run.answer);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod error;
pub mod prelude;
pub mod society;
pub mod stop;
pub mod types;

//! Test harness for scripted sector-automation scenarios.
//!
//! Seeds a `MockHost`, runs the real flows against it and checks the
//! resulting environment and journal.
//!
//! # Key Components
//!
//! - [`ScenarioBuilder`]: fluent API for seeding an environment and running flows
//! - [`report`]: structured text summaries of the environment after a run
//! - [`helpers`]: journal analysis shared by the assertions
//! - [`assertions`]: assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use report::WorldReport;
pub use workflow::ScenarioBuilder;

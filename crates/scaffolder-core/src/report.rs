//! Progress reporting
//!
//! The scaffolder pushes progress into a [`Reporter`]; it never reads anything
//! back, so reporters cannot influence the flow.

use crate::runtime::StepOutcome;
use crate::scaffold::ScaffoldStage;

pub trait Reporter {
    /// A state transition completed
    fn stage_reached(&self, _stage: ScaffoldStage) {}

    /// A labelled step is about to run
    fn step_started(&self, _label: &str) {}

    /// A labelled step finished, successfully or not
    fn step_finished(&self, _outcome: &StepOutcome) {}

    /// Free-form progress note
    fn note(&self, _message: &str) {}
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

//! Story contract: named scenario producers driven one step at a time.

use anyhow::Result;

use crate::context::ExecutionContext;

/// Timed operation invoked with the story's execution context.
pub type StepOp = Box<dyn FnOnce(&mut ExecutionContext) -> Result<()>>;

/// One labeled, individually timed scenario within a story.
pub struct Step {
    pub label: String,
    pub op: StepOp,
}

impl Step {
    pub fn new(
        label: impl Into<String>,
        op: impl FnOnce(&mut ExecutionContext) -> Result<()> + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            op: Box::new(op),
        }
    }
}

/// A lazy, finite, non-restartable step producer.
///
/// `next_step` performs any untimed setup preceding the step it returns and
/// may run final untimed teardown before returning `Ok(None)`. The runner
/// times only the returned step's `op`; a failure anywhere abandons the
/// story's remaining steps.
pub trait StoryRun {
    fn next_step(&mut self, ctx: &mut ExecutionContext) -> Result<Option<Step>>;
}

/// A registered story: a grouping name plus a constructor for a fresh run.
///
/// Multiple stories may share a name; their results merge under that name at
/// the scenario-label granularity.
#[derive(Clone, Copy)]
pub struct Story {
    pub name: &'static str,
    pub build: fn() -> Box<dyn StoryRun>,
}

//! Orchestration: single passes over the story set, repeats, and merging.

use anyhow::{anyhow, Result};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::{EnvironmentSpec, HarnessConfig};
use crate::context::ExecutionContext;
use crate::story::Story;
use crate::workspace::Workspace;

/// One timed scenario from a single pass.
#[derive(Debug, Clone)]
pub struct Sample {
    pub story: String,
    pub label: String,
    pub seconds: f64,
}

/// Every sample from one full pass over the story set, in execution order.
pub type PassResults = Vec<Sample>;

/// Pass-ordered duration lists for one story, keyed by scenario label.
#[derive(Debug)]
pub struct StoryTimes {
    pub name: String,
    pub scenarios: Vec<(String, Vec<f64>)>,
}

/// Merged durations for one environment: story name, then scenario label,
/// in first-seen order. A label a pass never reached contributes nothing to
/// that label's list.
#[derive(Debug, Default)]
pub struct MergedResults {
    stories: Vec<StoryTimes>,
}

impl MergedResults {
    pub fn stories(&self) -> &[StoryTimes] {
        &self.stories
    }

    fn append(&mut self, sample: &Sample) {
        let index = match self
            .stories
            .iter()
            .position(|story| story.name == sample.story)
        {
            Some(index) => index,
            None => {
                self.stories.push(StoryTimes {
                    name: sample.story.clone(),
                    scenarios: Vec::new(),
                });
                self.stories.len() - 1
            }
        };
        let story = &mut self.stories[index];
        match story
            .scenarios
            .iter_mut()
            .find(|(label, _)| *label == sample.label)
        {
            Some((_, times)) => times.push(sample.seconds),
            None => story
                .scenarios
                .push((sample.label.clone(), vec![sample.seconds])),
        }
    }
}

/// Merge independent passes into per-label duration lists, preserving pass
/// order within each list.
pub fn merge_passes(passes: &[PassResults]) -> MergedResults {
    let mut merged = MergedResults::default();
    for pass in passes {
        for sample in pass {
            merged.append(sample);
        }
    }
    merged
}

/// Run every requested story once, each against a freshly provisioned
/// context, and record one duration per scenario label.
pub fn run_pass(
    env: &EnvironmentSpec,
    config: &HarnessConfig,
    stories: &[Story],
    filter: Option<&[String]>,
) -> Result<PassResults> {
    let mut samples = PassResults::new();
    for story in stories {
        if let Some(filter) = filter {
            if !filter.iter().any(|name| name.as_str() == story.name) {
                continue;
            }
        }
        info!(environment = %env.name, story = story.name, "running story");

        let workspace = Workspace::provision(config)?;
        let mut ctx = ExecutionContext::new(workspace, env, config);
        ctx.initialize()?;

        let mut run = (story.build)();
        while let Some(step) = run.next_step(&mut ctx)? {
            let label = step.label;
            if samples
                .iter()
                .any(|sample| sample.story == story.name && sample.label == label)
            {
                return Err(anyhow!(
                    "story {:?} produced duplicate scenario label {label:?} in one pass",
                    story.name
                ));
            }
            let start = Instant::now();
            (step.op)(&mut ctx)?;
            let seconds = start.elapsed().as_secs_f64();
            debug!(story = story.name, label = %label, seconds, "scenario finished");
            samples.push(Sample {
                story: story.name.to_string(),
                label,
                seconds,
            });
        }
        ctx.close()?;
    }
    Ok(samples)
}

/// Run `repeat` passes for one environment and merge their durations.
pub fn run_environment(
    env: &EnvironmentSpec,
    config: &HarnessConfig,
    stories: &[Story],
    repeat: u32,
    filter: Option<&[String]>,
) -> Result<MergedResults> {
    let mut passes = Vec::with_capacity(repeat as usize);
    for pass in 1..=repeat {
        info!(environment = %env.name, pass, repeat, "starting pass");
        passes.push(run_pass(env, config, stories, filter)?);
    }
    Ok(merge_passes(&passes))
}

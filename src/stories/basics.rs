//! Push and pull a directory of 1024 small files.

use anyhow::{Context, Result};
use std::fs;

use super::{remove_data_dir, sidecar};
use crate::context::ExecutionContext;
use crate::fixture::FileSize;
use crate::story::{Step, Story, StoryRun};

pub const STORY: Story = Story {
    name: "basic data cloud",
    build: || Box::new(Basics::Start),
};

enum Basics {
    Start,
    Pushed { data: String },
    Pulled { data: String },
    Done,
}

impl StoryRun for Basics {
    fn next_step(&mut self, ctx: &mut ExecutionContext) -> Result<Option<Step>> {
        match std::mem::replace(self, Basics::Done) {
            Basics::Start => {
                let data = ctx.generate_data(1024, FileSize::Small, None)?;
                let dvc_file = sidecar(&data);
                *self = Basics::Pushed { data };
                Ok(Some(Step::new("push (1024 small files)", move |ctx| {
                    ctx.dvc(&["push", &dvc_file])
                })))
            }
            Basics::Pushed { data } => {
                // force a cache-miss pull
                remove_data_dir(ctx, &data)?;
                ctx.clear_cache()?;
                let dvc_file = sidecar(&data);
                *self = Basics::Pulled { data };
                Ok(Some(Step::new("pull (1024 small files)", move |ctx| {
                    ctx.dvc(&["pull", &dvc_file])
                })))
            }
            Basics::Pulled { data } => {
                let dvc_file = ctx.path_in_workspace(&sidecar(&data));
                fs::remove_file(&dvc_file)
                    .with_context(|| format!("remove {}", dvc_file.display()))?;
                remove_data_dir(ctx, &data)?;
                ctx.clear_cache()?;
                Ok(None)
            }
            Basics::Done => Ok(None),
        }
    }
}

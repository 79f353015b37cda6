//! Push and pull a small number of very large files.

use anyhow::Result;

use super::{remove_data_dir, sidecar};
use crate::context::ExecutionContext;
use crate::fixture::FileSize;
use crate::story::{Step, Story, StoryRun};

pub const STORY: Story = Story {
    name: "big files",
    build: || Box::new(GiantFile::Start),
};

enum GiantFile {
    Start,
    Initial { data: String },
    Grown { data: String },
    Done,
}

impl StoryRun for GiantFile {
    fn next_step(&mut self, ctx: &mut ExecutionContext) -> Result<Option<Step>> {
        match std::mem::replace(self, GiantFile::Done) {
            GiantFile::Start => {
                let data = ctx.generate_data(8, FileSize::Giant, None)?;
                let dvc_file = sidecar(&data);
                *self = GiantFile::Initial { data };
                Ok(Some(Step::new("push (8 x 80 mb files)", move |ctx| {
                    ctx.dvc(&["push", &dvc_file])
                })))
            }
            GiantFile::Initial { data } => {
                ctx.generate_data(12, FileSize::Giant, Some(&data))?;
                let dvc_file = sidecar(&data);
                *self = GiantFile::Grown { data };
                Ok(Some(Step::new(
                    "push (4 x 80 mb new files, 8 x 80 mb existing files)",
                    move |ctx| ctx.dvc(&["push", &dvc_file]),
                )))
            }
            GiantFile::Grown { data } => {
                remove_data_dir(ctx, &data)?;
                ctx.clear_cache()?;
                let dvc_file = sidecar(&data);
                Ok(Some(Step::new("pull (12 x 80 mb files)", move |ctx| {
                    ctx.dvc(&["pull", &dvc_file])
                })))
            }
            GiantFile::Done => Ok(None),
        }
    }
}

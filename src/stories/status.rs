//! Cloud status checks against a remote that drifts out of date.

use anyhow::Result;

use super::sidecar;
use crate::context::ExecutionContext;
use crate::fixture::FileSize;
use crate::story::{Step, Story, StoryRun};

pub const STORY: Story = Story {
    name: "basic data cloud",
    build: || Box::new(Status::Start),
};

enum Status {
    Start,
    Fresh { data: String },
    Stale { data: String },
    Done,
}

impl StoryRun for Status {
    fn next_step(&mut self, ctx: &mut ExecutionContext) -> Result<Option<Step>> {
        match std::mem::replace(self, Status::Done) {
            Status::Start => {
                let data = ctx.generate_data(1024, FileSize::Small, None)?;
                let dvc_file = sidecar(&data);
                // warm-up push so the first status sees a complete remote
                ctx.dvc(&["push", &dvc_file])?;
                *self = Status::Fresh { data };
                Ok(Some(Step::new(
                    "fresh status (nothing missing on the remote)",
                    move |ctx| ctx.dvc(&["status", "-c", &dvc_file]),
                )))
            }
            Status::Fresh { data } => {
                // grow the dataset in place to simulate drift
                ctx.generate_data(2048, FileSize::Small, Some(&data))?;
                let dvc_file = sidecar(&data);
                *self = Status::Stale { data };
                Ok(Some(Step::new(
                    "status (1024 files missing on the remote)",
                    move |ctx| ctx.dvc(&["status", "-c", &dvc_file]),
                )))
            }
            Status::Stale { data } => {
                let dvc_file = sidecar(&data);
                Ok(Some(Step::new(
                    "push only new files (1024 new small files / 1024 existing small files)",
                    move |ctx| ctx.dvc(&["push", &dvc_file]),
                )))
            }
            Status::Done => Ok(None),
        }
    }
}

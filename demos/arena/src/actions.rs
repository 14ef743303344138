//! Timed stand-in actions.  They only report completion after a fixed
//! duration; moving agents is the host's job.

use ua_agent::WorldView;
use ua_brain::{Action, CompletionSignal};
use ua_core::{AgentId, Context, Tag};

pub struct Timed {
    agent:         AgentId,
    kind:          &'static str,
    duration:      f32,
    interruptible: bool,
    remaining:     f32,
    done:          Option<CompletionSignal>,
}

impl Timed {
    pub fn new(agent: AgentId, kind: &'static str, duration: f32, interruptible: bool) -> Self {
        Self { agent, kind, duration, interruptible, remaining: 0.0, done: None }
    }
}

impl Action for Timed {
    fn perform(&mut self, ctx: &Context, view: &WorldView<'_>, done: CompletionSignal) {
        let target = ctx.target.and_then(|h| view.agents.resolve(h));
        tracing::debug!(agent = %self.agent, kind = self.kind, ?target, location = %ctx.location, "perform");
        self.remaining = self.duration;
        self.done = Some(done);
    }

    fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            if let Some(done) = self.done.take() {
                done.complete();
            }
        }
    }

    fn cancel(&mut self, interrupting: Option<&Tag>) {
        tracing::debug!(agent = %self.agent, kind = self.kind, ?interrupting, "cancel");
        self.done = None;
    }

    fn can_be_interrupted(&self) -> bool {
        self.interruptible
    }
}

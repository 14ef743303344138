//! The contract between the engine and whatever carries out a chosen action.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

use ua_agent::WorldView;
use ua_core::{AgentId, Context, MissLog, Tag, TagMap, UaError, UaResult};

/// A running action instance.
///
/// The brain calls [`perform`][Self::perform] once when the action wins and
/// then [`tick`][Self::tick] every frame until the action fires its
/// [`CompletionSignal`] or is cancelled.
pub trait Action: Send + 'static {
    fn perform(&mut self, ctx: &Context, view: &WorldView<'_>, done: CompletionSignal);

    /// Advance by `dt` simulated seconds.
    fn tick(&mut self, _dt: f32) {}

    /// Stop early.  `interrupting` names the definition taking over, or is
    /// `None` when the agent is being torn down or interrupted externally.
    fn cancel(&mut self, _interrupting: Option<&Tag>) {}

    /// Whether a better-scoring action may replace this one mid-run.
    fn can_be_interrupted(&self) -> bool {
        true
    }
}

/// Creates action instances for one action kind.
pub trait ActionFactory: Send + Sync + 'static {
    fn create(&self, agent: AgentId) -> Box<dyn Action>;
}

impl<F> ActionFactory for F
where
    F: Fn(AgentId) -> Box<dyn Action> + Send + Sync + 'static,
{
    fn create(&self, agent: AgentId) -> Box<dyn Action> {
        self(agent)
    }
}

/// One-shot completion handle handed to [`Action::perform`].
///
/// Consuming `complete` makes double completion unrepresentable.  Signals
/// belonging to an action that is no longer current are ignored.
#[derive(Debug)]
pub struct CompletionSignal {
    tx: SyncSender<()>,
}

impl CompletionSignal {
    pub fn complete(self) {
        // The brain may already have dropped the receiver (action replaced).
        let _ = self.tx.try_send(());
    }
}

/// Brain-side end of a [`CompletionSignal`].
#[derive(Debug)]
pub(crate) struct CompletionWatch {
    rx: Receiver<()>,
}

impl CompletionWatch {
    /// `true` once the paired signal has fired.
    pub(crate) fn poll(&self) -> bool {
        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => false,
        }
    }
}

pub(crate) fn completion_pair() -> (CompletionSignal, CompletionWatch) {
    let (tx, rx) = mpsc::sync_channel(1);
    (CompletionSignal { tx }, CompletionWatch { rx })
}

/// Action kind → factory table.
#[derive(Default)]
pub struct ActionLibrary {
    factories: TagMap<Arc<dyn ActionFactory>>,
    misses:    MissLog,
}

impl ActionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<Tag>, factory: impl ActionFactory) -> UaResult<()> {
        let kind = kind.into();
        if self.factories.contains_key(&kind) {
            return Err(UaError::DuplicateProvider { kind: "action", tag: kind });
        }
        self.factories.insert(kind, Arc::new(factory));
        Ok(())
    }

    /// Register a closure factory.
    pub fn register_fn<F>(&mut self, kind: impl Into<Tag>, f: F) -> UaResult<()>
    where
        F: Fn(AgentId) -> Box<dyn Action> + Send + Sync + 'static,
    {
        self.register(kind, f)
    }

    pub fn contains(&self, kind: &Tag) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Factory for `kind`.  Unknown kinds warn once.
    pub fn get(&self, kind: &Tag) -> Option<&Arc<dyn ActionFactory>> {
        let factory = self.factories.get(kind);
        if factory.is_none() && self.misses.first_miss(kind) {
            tracing::warn!(%kind, "no action registered for kind; definitions using it are skipped");
        }
        factory
    }
}

/// Where the render pipeline stands relative to the latest parameter change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Rendering,
    /// A pass is in flight and a newer snapshot is waiting behind it.
    PendingDirty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerAction<T> {
    /// Nothing was in flight; render this now.
    Start(T),
    /// Stored as the single pending snapshot, replacing any older one.
    Coalesced,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// The finished frame is current.
    Present,
    /// The finished frame is stale; render `next` immediately.
    Superseded { next: T },
    /// No pass was in flight.
    Ignored,
}

/// Latest-wins frame scheduling. At most one pass is in flight and at most one
/// snapshot waits behind it.
#[derive(Debug)]
pub struct FrameScheduler<T> {
    state: SchedulerState,
    pending: Option<T>,
}

impl<T> FrameScheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Idle,
            pending: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn submit(&mut self, snapshot: T) -> SchedulerAction<T> {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Rendering;
                SchedulerAction::Start(snapshot)
            }
            SchedulerState::Rendering | SchedulerState::PendingDirty => {
                self.pending = Some(snapshot);
                self.state = SchedulerState::PendingDirty;
                SchedulerAction::Coalesced
            }
        }
    }

    pub fn complete(&mut self) -> Completion<T> {
        match self.state {
            SchedulerState::Idle => Completion::Ignored,
            SchedulerState::Rendering => {
                self.state = SchedulerState::Idle;
                Completion::Present
            }
            SchedulerState::PendingDirty => match self.pending.take() {
                Some(next) => {
                    self.state = SchedulerState::Rendering;
                    Completion::Superseded { next }
                }
                None => {
                    self.state = SchedulerState::Idle;
                    Completion::Present
                }
            },
        }
    }

    /// Drops any waiting snapshot; an in-flight pass still completes.
    pub fn clear_pending(&mut self) {
        self.pending = None;
        if self.state == SchedulerState::PendingDirty {
            self.state = SchedulerState::Rendering;
        }
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

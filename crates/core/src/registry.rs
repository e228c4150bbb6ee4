//! Load-time merge/registration runtime
//!
//! The meeting point between emitted indices and the viewer consuming them.
//! Registration and consumer attachment are two events whose relative order
//! is unspecified: an index registered before any consumer attaches is
//! buffered in a single pending slot and drained on attach. A second
//! registration arriving before the drain overwrites the slot -
//! last-write-wins is the documented behavior of the pending slot, not a
//! race to be repaired here.
//!
//! The registry is the single owner of this state; `attach` and `register`
//! are its only mutators. One logical thread of control is assumed.

use crate::model::TraitIndex;
use tracing::debug;

type Consumer = Box<dyn FnMut(TraitIndex)>;

enum State {
    Empty { pending: Option<TraitIndex> },
    Registered,
}

pub struct ImplementorRegistry {
    state: State,
    consumer: Option<Consumer>,
}

impl ImplementorRegistry {
    pub fn new() -> Self {
        Self {
            state: State::Empty { pending: None },
            consumer: None,
        }
    }

    /// Whether at least one index has been delivered to a consumer.
    pub fn is_registered(&self) -> bool {
        matches!(self.state, State::Registered)
    }

    /// Whether an undelivered index sits in the pending slot.
    pub fn has_pending(&self) -> bool {
        matches!(self.state, State::Empty { pending: Some(_) })
    }

    /// Register an index. Delivered immediately when a consumer is attached,
    /// buffered in the pending slot otherwise.
    pub fn register(&mut self, index: TraitIndex) {
        match self.consumer.as_mut() {
            Some(consumer) => {
                consumer(index);
                self.state = State::Registered;
            }
            None => {
                if let State::Empty { pending } = &mut self.state {
                    if pending.is_some() {
                        debug!(
                            trait_path = %index.trait_ref.full_path(),
                            "overwriting pending index before drain"
                        );
                    }
                    *pending = Some(index);
                }
            }
        }
    }

    /// Attach the consumer callback, draining any pending index before
    /// further registrations are accepted. A later attach replaces the
    /// consumer; the hook is a single mutable slot.
    pub fn attach(&mut self, consumer: impl FnMut(TraitIndex) + 'static) {
        let mut consumer: Consumer = Box::new(consumer);

        if let State::Empty { pending } = &mut self.state
            && let Some(index) = pending.take()
        {
            consumer(index);
            self.state = State::Registered;
        }

        self.consumer = Some(consumer);
    }
}

impl Default for ImplementorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

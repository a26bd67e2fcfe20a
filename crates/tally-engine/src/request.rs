//! Messages sent from the bridge to the actor thread.

use crossbeam_channel::Sender;
use tally_core::Snapshot;

/// One unit of work for the actor. Consumed exactly once.
pub(crate) enum Request<T> {
    /// Append a value to the accumulated sequence.
    Append(T),
    /// Copy the sequence and send it back on the enclosed bounded(1)
    /// reply channel. The caller may have stopped listening by the time
    /// the reply is sent.
    Snapshot(Sender<Snapshot<T>>),
}

impl<T> Request<T> {
    /// Short label for log fields.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Append(_) => "append",
            Self::Snapshot(_) => "snapshot",
        }
    }
}

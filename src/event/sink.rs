use crossbeam_channel as cbc;

use crate::event::transition::TransitionEvent;

/// Recording capability handed to every car.
///
/// `record` is fire-and-forget: a slow, closed or failing sink must not
/// block or fail the state transition that produced the event.
pub trait EventSink: Send + Sync {
    fn record(&self, event: TransitionEvent);
}

/// Forwards events to whatever consumer holds the receiving end,
/// typically the journal thread.
pub struct ChannelSink {
    tx: cbc::Sender<TransitionEvent>,
}

impl ChannelSink {
    pub fn new(tx: cbc::Sender<TransitionEvent>) -> ChannelSink {
        ChannelSink { tx }
    }
}

impl EventSink for ChannelSink {
    fn record(&self, event: TransitionEvent) {
        // A hung-up consumer only costs us the event, never the transition.
        match self.tx.send(event) {
            Ok(_) => {}
            Err(_) => {
                eprintln!("Couldn't record transition event, consumer is gone");
            }
        }
    }
}

/// Discards every event, for callers without a recording collaborator.
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: TransitionEvent) {}
}

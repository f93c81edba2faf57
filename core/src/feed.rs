//! Replace-latest-value handoff between host callbacks and the frame tick.
//!
//! Sensor and scan callbacks may arrive on any thread; only the newest value
//! ever needs to reach the frame cycle, so the channel overwrites instead of
//! queueing, and stale intermediate values are dropped.

use tokio::sync::watch;

pub struct FeedPublisher<T> {
    sender: watch::Sender<Option<T>>,
}

pub struct FeedReader<T> {
    receiver: watch::Receiver<Option<T>>,
}

/// Connected publisher/reader pair with no initial value.
pub fn latest_value<T: Clone>() -> (FeedPublisher<T>, FeedReader<T>) {
    let (sender, receiver) = watch::channel(None);
    (FeedPublisher { sender }, FeedReader { receiver })
}

impl<T: Clone> FeedPublisher<T> {
    /// Replaces whatever the reader has not yet consumed.
    pub fn publish(&self, value: T) {
        self.sender.send_replace(Some(value));
    }
}

impl<T: Clone> FeedReader<T> {
    /// Newest unseen value, if one arrived since the last call.
    pub fn take_latest(&mut self) -> Option<T> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }
}

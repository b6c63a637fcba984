//! Channel-based row source.
//!
//! Receives row collections via a tokio watch channel. This is the shape to
//! use when rows are pushed by a background fetch (network call, database
//! query) rather than polled from a file.

use std::fmt::Debug;
use std::thread;
use std::time::Duration;

use tokio::sync::watch;

use super::RowSource;

/// Sending half paired with a [`ChannelSource`].
///
/// The watched value is `None` until the first delivery, so a grid wired to
/// this source stays in its loading phase until rows actually arrive.
pub type RowSender<T> = watch::Sender<Option<Vec<T>>>;

/// A row source that receives collections via a watch channel.
///
/// Only the latest collection is retained; a slow consumer sees the newest
/// rows, not a backlog.
///
/// # Example
///
/// ```
/// use gridfield::source::{ChannelSource, RowSource};
///
/// let (tx, mut source) = ChannelSource::<i64>::create("backend");
/// assert!(source.poll().is_none());
///
/// tx.send(Some(vec![1, 2, 3])).unwrap();
/// assert_eq!(source.poll(), Some(vec![1, 2, 3]));
/// ```
#[derive(Debug)]
pub struct ChannelSource<T> {
    receiver: watch::Receiver<Option<Vec<T>>>,
    description: String,
    /// Track if the pre-seeded value has been offered yet
    initial_returned: bool,
}

impl<T: Clone + Debug + Send + Sync + 'static> ChannelSource<T> {
    /// Wrap an existing receiver.
    ///
    /// If the channel already holds `Some(rows)` at construction, the first
    /// poll delivers them.
    pub fn new(receiver: watch::Receiver<Option<Vec<T>>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
            initial_returned: false,
        }
    }

    /// Create a channel pair for pushing rows to a grid.
    ///
    /// Returns (sender, source); the watched value starts as `None`.
    pub fn create(source_description: &str) -> (RowSender<T>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }

    /// Create a source whose rows arrive after a delay, from a background
    /// thread. Stands in for a network fetch in demos and tests.
    pub fn delayed(rows: Vec<T>, delay: Duration, source_description: &str) -> Self {
        let (tx, source) = Self::create(source_description);
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(Some(rows));
        });
        source
    }
}

impl<T: Clone + Debug + Send + Sync + 'static> RowSource<T> for ChannelSource<T> {
    fn poll(&mut self) -> Option<Vec<T>> {
        // Offer the pre-seeded value on first poll
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        // borrow_and_update still observes a final value sent just before
        // the sender was dropped, which has_changed() alone would miss.
        let latest = self.receiver.borrow_and_update();
        if latest.has_changed() {
            latest.clone()
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Delivery failures belong to the producer side of the channel
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_is_quiet_until_rows_arrive() {
        let (tx, mut source) = ChannelSource::<u32>::create("test");

        assert!(source.poll().is_none());
        assert!(source.poll().is_none());

        tx.send(Some(vec![1, 2])).unwrap();
        assert_eq!(source.poll(), Some(vec![1, 2]));

        // No change since the last delivery
        assert!(source.poll().is_none());
    }

    #[test]
    fn replacement_collections_supersede_older_ones() {
        let (tx, mut source) = ChannelSource::<u32>::create("test");

        tx.send(Some(vec![1])).unwrap();
        tx.send(Some(vec![2, 3])).unwrap();
        assert_eq!(source.poll(), Some(vec![2, 3]));
    }

    #[test]
    fn final_send_survives_sender_drop() {
        let (tx, mut source) = ChannelSource::<u32>::create("test");

        tx.send(Some(vec![7])).unwrap();
        drop(tx);
        assert_eq!(source.poll(), Some(vec![7]));
        assert!(source.poll().is_none());
    }

    #[test]
    fn pre_seeded_receiver_delivers_on_first_poll() {
        let (_tx, rx) = watch::channel(Some(vec![9u32]));
        let mut source = ChannelSource::new(rx, "seeded");

        assert_eq!(source.poll(), Some(vec![9]));
        assert!(source.poll().is_none());
        assert_eq!(source.description(), "channel: seeded");
    }

    #[test]
    fn delayed_rows_arrive_after_the_delay() {
        let mut source =
            ChannelSource::delayed(vec![5u32], Duration::from_millis(20), "slow backend");

        assert!(source.poll().is_none());
        thread::sleep(Duration::from_millis(60));
        assert_eq!(source.poll(), Some(vec![5]));
    }
}

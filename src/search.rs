//! Debounced search notifications
//!
//! Every keystroke yields a [`Ticket`]. A ticket only turns into a search
//! once its quiet period has elapsed and no newer keystroke has arrived.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Default quiet period before a search fires
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

/// Pending notification for one input value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    text: String,
    deadline: Instant,
}

impl Ticket {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wait out the quiet period, then hand the ticket back for settling
    pub async fn elapsed(self) -> Ticket {
        sleep_until(self.deadline).await;
        self
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
        }
    }

    /// Record a new input value; supersedes every outstanding ticket
    pub fn push(&mut self, text: impl Into<String>) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
            text: text.into(),
            deadline: Instant::now() + self.delay,
        }
    }

    /// Invalidate every outstanding ticket without queueing a new value
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// Text to search for, or `None` when a newer value has been pushed
    pub fn settle(&self, ticket: Ticket) -> Option<String> {
        if ticket.generation == self.generation {
            Some(ticket.text)
        } else {
            tracing::trace!(
                "Dropping superseded search {:?} ({} < {})",
                ticket.text,
                ticket.generation,
                self.generation
            );
            None
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(debouncer: &Debouncer, tickets: Vec<Ticket>) -> Vec<String> {
        let mut fired = Vec::new();
        for ticket in tickets {
            if let Some(text) = debouncer.settle(ticket.elapsed().await) {
                fired.push(text);
            }
        }
        fired
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_fires_once_with_final_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let first = debouncer.push("naruto");
        tokio::time::advance(Duration::from_millis(200)).await;
        let second = debouncer.push("naruto shippuden");

        let fired = run(&debouncer, vec![first, second]).await;
        assert_eq!(fired, vec!["naruto shippuden".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_gap_fires_each_value() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let first = debouncer.push("one");
        let fired = run(&debouncer, vec![first]).await;
        assert_eq!(fired, vec!["one".to_string()]);

        let second = debouncer.push("two");
        let fired = run(&debouncer, vec![second]).await;
        assert_eq!(fired, vec!["two".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticket_waits_full_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        let start = Instant::now();
        let ticket = debouncer.push("frieren").elapsed().await;
        assert!(Instant::now() - start >= Duration::from_millis(500));
        assert_eq!(ticket.text(), "frieren");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_goes_through_same_path() {
        let mut debouncer = Debouncer::default();
        let typed = debouncer.push("bleach");
        let cleared = debouncer.push("");
        let fired = run(&debouncer, vec![typed, cleared]).await;
        assert_eq!(fired, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_cancel_rejects_outstanding_ticket() {
        let mut debouncer = Debouncer::default();
        let typed = debouncer.push("monster");
        debouncer.cancel();
        assert_eq!(debouncer.settle(typed), None);

        let next = debouncer.push("mushishi");
        assert_eq!(debouncer.settle(next), Some("mushishi".to_string()));
    }

    #[tokio::test]
    async fn test_many_pushes_only_last_settles() {
        let mut debouncer = Debouncer::default();
        let tickets: Vec<Ticket> = ["o", "on", "one", "one ", "one p"]
            .iter()
            .map(|t| debouncer.push(*t))
            .collect();
        let settled: Vec<String> = tickets
            .into_iter()
            .filter_map(|t| debouncer.settle(t))
            .collect();
        assert_eq!(settled, vec!["one p".to_string()]);
    }
}

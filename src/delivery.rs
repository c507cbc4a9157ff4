use crate::models::ContactId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const CANNED_REPLIES: [&str; 5] = [
    "Thanks for your message!",
    "Got it, thanks!",
    "Sounds good!",
    "I'll get back to you soon.",
    "Perfect, let's do that.",
];

/// A reply owed to `contact`, due `delay` after the send that produced it.
/// The contact is fixed here so later navigation cannot redirect the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTicket {
    pub contact: ContactId,
    pub delay: Duration,
}

/// Stand-in for a transport: decides when a peer "answers" and with what.
#[derive(Debug)]
pub struct SimulatedDelivery {
    min_delay: Duration,
    max_delay: Duration,
    rng: StdRng,
}

impl SimulatedDelivery {
    /// `min_delay` must be strictly below `max_delay`; config validation
    /// guarantees this for loaded settings.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self::with_rng(min_delay, max_delay, StdRng::from_entropy())
    }

    pub fn with_rng(min_delay: Duration, max_delay: Duration, rng: StdRng) -> Self {
        Self {
            min_delay,
            max_delay,
            rng,
        }
    }

    /// Uniform in `[min_delay, max_delay)`, at millisecond resolution.
    pub fn sample_delay(&mut self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = (self.max_delay.as_millis() as u64).max(min + 1);
        Duration::from_millis(self.rng.gen_range(min..max))
    }

    pub fn ticket(&mut self, contact: ContactId) -> ReplyTicket {
        ReplyTicket {
            contact,
            delay: self.sample_delay(),
        }
    }

    pub fn pick_reply(&mut self) -> &'static str {
        CANNED_REPLIES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CANNED_REPLIES[0])
    }
}

//! Generation tickets for async work whose result may arrive after the
//! caller has moved on (bullet suggestions, PDF rasterization).
//!
//! Each request takes a ticket; issuing a newer ticket or calling
//! `invalidate` makes every earlier ticket stale, and completions holding a
//! stale ticket are dropped by their owner.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct TicketCounter {
    current: AtomicU64,
}

impl TicketCounter {
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

//! Sequence Manager
//!
//! Monotonic id generation for the ledger services. Each service owns one
//! sequence; ids embed the creation timestamp so they sort in issue order
//! even across restarts of the in-process store.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source for one ledger
#[derive(Debug)]
pub struct IdSequence {
    ledger_name: &'static str,
    current: AtomicU64,
}

impl IdSequence {
    pub fn new(ledger_name: &'static str) -> Self {
        Self {
            ledger_name,
            current: AtomicU64::new(0),
        }
    }

    /// Next raw sequence value
    pub fn next(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Generate a new id: `{prefix}_{timestamp_micros:016x}_{seq:08x}`
    pub fn generate_id(&self) -> String {
        let seq = self.next();
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", self.ledger_name, timestamp, seq)
    }
}

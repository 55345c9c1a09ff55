//! Reusable encode buffers.
//!
//! A fixed arena of slots plus a free-slot queue. A producer `acquire`s a slot's buffer,
//! encodes into it and sends it to the dispatch thread, which `release`s it after every sink
//! has seen it. Ownership of the `Vec` moves with the [`Encoded`] value, so a buffer can never
//! be reused while the consumer still holds it. When every slot is in flight, `acquire`
//! allocates an unpooled buffer that is simply dropped on release.

use crate::level::Level;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::{Mutex, PoisonError};

/// Initial capacity reserved for a fresh buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// One encoded record in flight. Sinks read the level to apply their own band filter.
#[derive(Debug)]
pub struct Encoded {
    slot: Option<usize>,
    level: Level,
    bytes: Vec<u8>,
}

impl Encoded {
    /// Unpooled record, for sinks driven directly (tests, benches, custom pipelines).
    #[must_use]
    pub fn new(level: Level, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: None,
            level,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) const fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    #[must_use]
    pub const fn slot(&self) -> Option<usize> {
        self.slot
    }
}

pub struct BufferPool {
    slots: Box<[Mutex<Vec<u8>>]>,
    free_tx: Sender<usize>,
    free_rx: Receiver<usize>,
    buffer_capacity: usize,
}

impl BufferPool {
    #[must_use]
    pub fn new(slots: usize, buffer_capacity: usize) -> Self {
        let (free_tx, free_rx) = bounded(slots.max(1));
        for index in 0..slots {
            // Capacity equals slot count, so this never blocks.
            let _ = free_tx.send(index);
        }
        Self {
            slots: (0..slots).map(|_| Mutex::new(Vec::new())).collect(),
            free_tx,
            free_rx,
            buffer_capacity,
        }
    }

    /// Hands out an empty buffer tagged with `level`.
    pub fn acquire(&self, level: Level) -> Encoded {
        let (slot, mut bytes) = match self.free_rx.try_recv() {
            Ok(index) => {
                let bytes = std::mem::take(
                    &mut *self.slots[index]
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner),
                );
                (Some(index), bytes)
            }
            Err(_) => (None, Vec::new()),
        };
        bytes.clear();
        bytes.reserve(self.buffer_capacity);
        Encoded { slot, level, bytes }
    }

    /// Truncates the buffer and parks it back in its slot.
    pub fn release(&self, encoded: Encoded) {
        let Encoded {
            slot, mut bytes, ..
        } = encoded;
        let Some(index) = slot.filter(|&i| i < self.slots.len()) else {
            return;
        };
        bytes.clear();
        *self.slots[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = bytes;
        let _ = self.free_tx.send(index);
    }

    /// Slots currently idle.
    #[must_use]
    pub fn available(&self) -> usize {
        self.free_rx.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.capacity())
            .field("available", &self.available())
            .finish()
    }
}

//! src/chart/ring.rs
//!
//! Fixed-capacity circular buffer of (raw, filtered) sample pairs.
//!
//! The buffer is always "full": slots start zeroed and are overwritten in
//! place. Only the first `active` slots take part in wrapping; the rest of the
//! allocation is kept around so a viewport that shrinks and grows again does
//! not need a fresh buffer.

/// One plotted point: the raw sensor value and its smoothed counterpart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sample {
    pub raw: f32,
    pub filtered: f32,
}

impl Sample {
    pub fn new(raw: f32, filtered: f32) -> Self {
        Self { raw, filtered }
    }
}

#[derive(Debug)]
pub struct RingBuffer {
    /// backing storage; its length is the capacity
    slots: Vec<Sample>,

    /// next slot to overwrite
    cursor: usize,

    /// number of slots currently wrapped over (always <= capacity)
    active: usize,
}

impl RingBuffer {
    /// Create a zeroed buffer with `capacity` slots, all of them active.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![Sample::default(); capacity],
            cursor: 0,
            active: capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_len(&self) -> usize {
        self.active
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Make `n` slots active.
    ///
    /// # Arguments
    /// * `n` - number of slots to wrap over; at least one is kept.
    ///
    /// # Returns
    /// `true` if the buffer was reallocated. That only happens when `n`
    /// exceeds the capacity, and it drops all history and resets the cursor.
    /// A smaller `n` keeps storage and cursor as they are.
    pub fn set_active(&mut self, n: usize) -> bool {
        let n = n.max(1);
        let reallocated = n > self.slots.len();
        if reallocated {
            self.slots = vec![Sample::default(); n];
            self.cursor = 0;
        }
        self.active = n;
        reallocated
    }

    /// Overwrite the slot under the cursor and advance it modulo the active length.
    pub fn push(&mut self, sample: Sample) {
        self.slots[self.cursor] = sample;
        self.cursor = (self.cursor + 1) % self.active;
    }

    /// Sample at `offset` positions after the cursor, wrapping over the active slots.
    ///
    /// `offset == 0` is the oldest sample, `active_len() - 1` the newest.
    pub fn from_oldest(&self, offset: usize) -> Sample {
        self.slots[(self.cursor + offset) % self.active]
    }

    /// Iterate the active slots oldest to newest.
    pub fn chronological(&self) -> impl Iterator<Item = Sample> + '_ {
        (0..self.active).map(move |i| self.from_oldest(i))
    }
}

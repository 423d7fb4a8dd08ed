//! Capture spans and the crawl log.
//!
//! Every capture write appends its slot to the crawl log, so undoing the
//! writes made since some point is a matter of popping the log back to its
//! saved length.

use std::ops::Range;

use regvm_bytecode::Slot;

#[derive(Debug, Default)]
pub struct CaptureState {
    /// Spans recorded for each slot, oldest first.
    spans: Vec<Vec<Range<usize>>>,
    /// Slot of every capture write, in write order.
    crawl: Vec<Slot>,
}

impl CaptureState {
    /// Clear all spans, keeping allocations.
    pub fn reset(&mut self, slot_count: usize) {
        self.spans.resize_with(slot_count, Vec::new);
        self.spans.truncate(slot_count);
        for spans in &mut self.spans {
            spans.clear();
        }
        self.crawl.clear();
    }

    /// Record a span; the bounds may arrive in either order.
    pub fn capture(&mut self, slot: Slot, a: usize, b: usize) {
        let span = if a <= b { a..b } else { b..a };
        self.spans[slot].push(span);
        self.crawl.push(slot);
    }

    /// Undo the most recent capture write.
    pub fn uncapture(&mut self) {
        let slot = self.crawl.pop().expect("crawl log underflow");
        self.spans[slot].pop();
    }

    /// Undo writes until the crawl log is `len` long.
    pub fn uncapture_to(&mut self, len: usize) {
        while self.crawl.len() > len {
            self.uncapture();
        }
    }

    #[inline]
    pub fn crawl_len(&self) -> usize {
        self.crawl.len()
    }

    pub fn is_matched(&self, slot: Slot) -> bool {
        !self.spans[slot].is_empty()
    }

    pub fn last(&self, slot: Slot) -> Option<Range<usize>> {
        self.spans[slot].last().cloned()
    }

    pub fn spans(&self) -> &[Vec<Range<usize>>] {
        &self.spans
    }
}

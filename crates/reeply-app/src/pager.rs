// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Thread;

/// Accumulates offset/limit pages from the threads endpoint into one flat,
/// ordered list. The endpoint reports no total count, so a page shorter
/// than the page size is the end-of-data signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadPager {
    threads: Vec<Thread>,
    page_size: usize,
    pages_absorbed: usize,
    exhausted: bool,
}

impl ThreadPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            threads: Vec::new(),
            page_size: page_size.max(1),
            pages_absorbed: 0,
            exhausted: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Offset for the next page request: threads loaded so far.
    pub fn next_offset(&self) -> usize {
        self.threads.len()
    }

    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn pages_absorbed(&self) -> usize {
        self.pages_absorbed
    }

    /// Appends one page in arrival order. Returns the number of threads
    /// absorbed; absorbing after exhaustion is a no-op.
    pub fn absorb_page(&mut self, page: Vec<Thread>) -> usize {
        if self.exhausted {
            return 0;
        }
        let absorbed = page.len();
        if absorbed < self.page_size {
            self.exhausted = true;
        }
        self.pages_absorbed += 1;
        self.threads.extend(page);
        absorbed
    }

    /// True when the viewport's last visible row is within `lookahead` rows
    /// of the end of the loaded list and more data may remain. The first
    /// page is requested unconditionally at startup, never through here.
    pub fn should_fetch(&self, last_visible_row: usize, lookahead: usize) -> bool {
        if self.exhausted || self.pages_absorbed == 0 {
            return false;
        }
        last_visible_row + lookahead + 1 >= self.threads.len()
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use reeply_api::Client;
use reeply_app::Thread;
use reeply_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;

const DEMO_THREAD_COUNT: usize = 160;

/// Runtime backed by the threads API. Page fetches run on a worker thread
/// so the event loop keeps drawing while a request is on the wire.
pub struct HttpRuntime {
    client: Client,
    page_size: usize,
}

impl HttpRuntime {
    pub fn new(client: Client, page_size: usize) -> Self {
        Self { client, page_size }
    }
}

impl AppRuntime for HttpRuntime {
    fn page_size(&self) -> usize {
        self.page_size
    }

    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Thread>> {
        self.client.fetch_threads(offset, limit)
    }

    fn spawn_fetch_page(
        &mut self,
        request_id: u64,
        offset: usize,
        limit: usize,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let client = self.client.clone();
        thread::spawn(move || {
            let result = client
                .fetch_threads(offset, limit)
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(InternalEvent::PageLoaded { request_id, result });
        });
        Ok(())
    }
}

/// Offline runtime serving deterministic generated threads, sliced the same
/// way the server pages its results.
pub struct DemoRuntime {
    threads: Vec<Thread>,
    page_size: usize,
}

impl DemoRuntime {
    pub fn new(page_size: usize) -> Self {
        Self {
            threads: reeply_testkit::demo_threads(DEMO_THREAD_COUNT),
            page_size,
        }
    }
}

impl AppRuntime for DemoRuntime {
    fn page_size(&self) -> usize {
        self.page_size
    }

    fn fetch_page(&mut self, offset: usize, limit: usize) -> Result<Vec<Thread>> {
        let start = offset.min(self.threads.len());
        let end = start.saturating_add(limit).min(self.threads.len());
        Ok(self.threads[start..end].to_vec())
    }
}

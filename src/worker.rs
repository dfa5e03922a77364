// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runs store access on a dedicated thread so an interactive caller never
//! blocks on SQLite. Only the worker thread touches the connection, which
//! keeps writes serialized.

use crate::error::StoreError;
use crate::store::Store;
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::debug;

type Job = Box<dyn FnOnce(&Store) + Send>;

pub struct PersistenceWorker {
    jobs: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistenceWorker {
    pub fn spawn(store: Store) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<Job>();
        let handle = thread::spawn(move || {
            debug!("persistence worker started");
            for job in rx {
                job(&store);
            }
            debug!("persistence worker stopped");
        });
        Self {
            jobs: Some(tx),
            handle: Some(handle),
        }
    }

    /// Queues `f` and returns a receiver for its result.
    pub fn submit<T, F>(&self, f: F) -> Result<Receiver<Result<T, StoreError>>, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
    {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let job: Job = Box::new(move |store: &Store| {
            // the caller may have stopped waiting
            let _ = reply_tx.send(f(store));
        });
        self.jobs
            .as_ref()
            .ok_or(StoreError::WorkerGone)?
            .send(job)
            .map_err(|_| StoreError::WorkerGone)?;
        Ok(reply_rx)
    }

    /// Queues `f` and waits for its result.
    pub fn call<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
    {
        self.submit(f)?
            .recv()
            .map_err(|_| StoreError::WorkerGone)?
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        drop(self.jobs.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

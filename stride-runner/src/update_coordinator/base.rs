use crate::{BatchMessage, RunnerError};
use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::info;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use stride_core::{
    record::{Record, RecordValue::Scalar},
    Agent, Env,
};

/// Pulls accumulated experience from the channel and drives the agent's update.
///
/// Update timing is controlled by the caller, not by environment stepping:
/// one call to [`update_once`](UpdateCoordinator::update_once) performs
/// exactly one update with whatever experience is already queued.
pub struct UpdateCoordinator<A, E>
where
    A: Agent<E>,
    E: Env,
{
    agent: Arc<Mutex<A>>,
    receiver: Receiver<BatchMessage<E>>,
    timeout: Duration,
}

impl<A, E> UpdateCoordinator<A, E>
where
    A: Agent<E>,
    E: Env,
{
    /// Creates an [`UpdateCoordinator`] reading from `receiver`.
    pub fn new(agent: Arc<Mutex<A>>, receiver: Receiver<BatchMessage<E>>, timeout: Duration) -> Self {
        Self {
            agent,
            receiver,
            timeout,
        }
    }

    /// Performs one update cycle.
    ///
    /// Blocks for the first batch up to the timeout ceiling, then greedily
    /// merges batches already queued until the held batch is terminal or the
    /// channel is momentarily empty, and finally invokes the agent's update
    /// with the merged batch. Returns a [`Record`] describing the update.
    pub fn update_once(&mut self) -> Result<Record> {
        let msg = self.receiver.recv_timeout(self.timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => RunnerError::PullTimeout(self.timeout),
            RecvTimeoutError::Disconnected => RunnerError::Disconnected,
        })?;
        let mut batch = msg.batch;
        let mut merged = 1;

        // Greedy drain: merge what is already queued, never wait for more
        while !batch.terminal() {
            match self.receiver.try_recv() {
                Ok(msg) => {
                    batch.merge(msg.batch);
                    merged += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        info!(
            "Updating agent with {} transitions from {} batches",
            batch.len(),
            merged
        );
        self.agent.lock().unwrap().update(&batch)?;

        Ok(Record::from_slice(&[
            ("batch_steps", Scalar(batch.len() as f32)),
            ("batches_merged", Scalar(merged as f32)),
        ]))
    }
}

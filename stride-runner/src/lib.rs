#![warn(missing_docs)]
//! A decoupled execution/update runner for reinforcement learning.
//!
//! Environment stepping and agent updates proceed asynchronously instead of
//! in lock-step: an [`EpisodeRunner`] interacts with the environment on a
//! dedicated thread and pushes batch snapshots into a bounded channel, while
//! an [`UpdateCoordinator`] pulls them on the caller's thread, merges
//! consecutive non-terminal batches and drives the agent's update. The
//! bounded channel provides backpressure, coupling sampling speed to update
//! speed; a push or pull exceeding the timeout ceiling is fatal.
//!
//! [`ThreadRunner`] wires the two together and owns the channel, the
//! sampling thread and the stop flag.
mod episode_runner;
mod error;
mod messages;
mod thread_runner;
mod update_coordinator;

pub use episode_runner::{runner_stat_fmt, EpisodeRunner, EpisodeRunnerStat};
pub use error::RunnerError;
pub use messages::BatchMessage;
pub use thread_runner::{ThreadRunner, ThreadRunnerConfig};
pub use update_coordinator::UpdateCoordinator;

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use crossbeam_channel::bounded;
    use std::{
        sync::{Arc, Mutex},
        time::{Duration, Instant},
    };
    use stride_core::{
        dummy::{DummyAct, DummyAgent, DummyEnv, DummyEnvConfig, DummyObs},
        record::{Record, Recorder},
        Agent, ExperienceBatch, IdentityPreprocessor, Transition,
    };
    use test_log::test;

    type Runner = ThreadRunner<DummyAgent, DummyEnv, IdentityPreprocessor, SharedRecorder>;

    /// Recorder sharing its buffer across threads, for asserting on events.
    #[derive(Clone, Default)]
    struct SharedRecorder(Arc<Mutex<Vec<Record>>>);

    impl Recorder for SharedRecorder {
        fn write(&mut self, record: Record) {
            self.0.lock().unwrap().push(record);
        }
    }

    /// Agent capturing the exact transition order of every update call.
    #[derive(Default)]
    struct ProbeAgent {
        updates: Vec<(Vec<usize>, bool)>,
    }

    impl Agent<DummyEnv> for ProbeAgent {
        type Context = ();

        fn set_session(&mut self, _ctx: Self::Context) {}

        fn get_action(&mut self, _obs: &DummyObs, _episode: usize) -> DummyAct {
            DummyAct(0)
        }

        fn add_observation(
            &mut self,
            _obs: DummyObs,
            _act: DummyAct,
            _reward: f32,
            _is_terminal: bool,
        ) {
        }

        fn take_batch(&mut self) -> ExperienceBatch<DummyEnv> {
            ExperienceBatch::new()
        }

        fn update(&mut self, batch: &ExperienceBatch<DummyEnv>) -> Result<()> {
            let ids = batch.transitions().iter().map(|t| t.obs().0).collect();
            self.updates.push((ids, batch.terminal()));
            Ok(())
        }
    }

    fn batch(ids: std::ops::Range<usize>, terminal: bool) -> ExperienceBatch<DummyEnv> {
        let last = ids.end - 1;
        let mut b = ExperienceBatch::new();
        for i in ids {
            b.push(Transition::new(
                DummyObs(i),
                DummyAct(0),
                1.0,
                terminal && i == last,
            ));
        }
        b
    }

    fn config() -> ThreadRunnerConfig {
        ThreadRunnerConfig {
            episodes: 100,
            max_episode_steps: 100,
            local_steps: 4,
            repeat_actions: 1,
            channel_capacity: 10,
            timeout_secs: 1,
        }
    }

    #[test]
    fn drain_merges_queued_batches_until_terminal() {
        let (s, r) = bounded(10);
        s.send(BatchMessage { id: 0, batch: batch(0..2, false) }).unwrap();
        s.send(BatchMessage { id: 0, batch: batch(2..5, false) }).unwrap();
        s.send(BatchMessage { id: 0, batch: batch(5..6, true) }).unwrap();

        let agent = Arc::new(Mutex::new(ProbeAgent::default()));
        let mut coordinator =
            UpdateCoordinator::new(agent.clone(), r, Duration::from_millis(100));
        let record = coordinator.update_once().unwrap();

        let agent = agent.lock().unwrap();
        assert_eq!(agent.updates.len(), 1);
        assert_eq!(agent.updates[0].0, (0..6).collect::<Vec<_>>());
        assert!(agent.updates[0].1);
        assert_eq!(record.get_scalar("batches_merged").unwrap(), 3.0);
        assert_eq!(record.get_scalar("batch_steps").unwrap(), 6.0);
    }

    #[test]
    fn drain_short_circuits_when_channel_is_empty() {
        let (s, r) = bounded(10);
        s.send(BatchMessage { id: 0, batch: batch(0..2, false) }).unwrap();

        let agent = Arc::new(Mutex::new(ProbeAgent::default()));
        let mut coordinator = UpdateCoordinator::new(agent.clone(), r, Duration::from_secs(600));

        // Must not block waiting for a second batch
        let start = Instant::now();
        coordinator.update_once().unwrap();
        assert!(start.elapsed() < Duration::from_millis(500));

        let agent = agent.lock().unwrap();
        assert_eq!(agent.updates.len(), 1);
        assert_eq!(agent.updates[0].0, vec![0, 1]);
        assert!(!agent.updates[0].1);
    }

    #[test]
    fn batches_are_delivered_in_push_order() {
        let (s, r) = bounded(10);
        s.send(BatchMessage { id: 0, batch: batch(0..2, true) }).unwrap();
        s.send(BatchMessage { id: 0, batch: batch(2..4, true) }).unwrap();

        let agent = Arc::new(Mutex::new(ProbeAgent::default()));
        let mut coordinator =
            UpdateCoordinator::new(agent.clone(), r, Duration::from_millis(100));
        coordinator.update_once().unwrap();
        coordinator.update_once().unwrap();

        let agent = agent.lock().unwrap();
        assert_eq!(agent.updates[0].0, vec![0, 1]);
        assert_eq!(agent.updates[1].0, vec![2, 3]);
    }

    #[test]
    fn pull_timeout_is_fatal_and_distinguishable() {
        let (_s, r) = bounded::<BatchMessage<DummyEnv>>(10);
        let agent = Arc::new(Mutex::new(ProbeAgent::default()));
        let mut coordinator = UpdateCoordinator::new(agent, r, Duration::from_millis(50));

        let err = coordinator.update_once().unwrap_err();
        match err.downcast_ref::<RunnerError>() {
            Some(RunnerError::PullTimeout(_)) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn push_times_out_when_consumer_stalls() {
        let config = ThreadRunnerConfig {
            channel_capacity: 1,
            ..config()
        };
        let env_config = DummyEnvConfig {
            terminal_at: None,
            reward: 1.0,
        };
        let mut runner = Runner::build(
            config,
            DummyAgent::new(2),
            env_config,
            None,
            SharedRecorder::default(),
            0,
        );
        runner.run(());

        // Nothing is pulled, so the second push must hit the timeout ceiling
        let err = runner.join().unwrap_err();
        match err.downcast_ref::<RunnerError>() {
            Some(RunnerError::PushTimeout(_)) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn step_limit_cuts_episode_on_the_step_after_max() {
        let config = ThreadRunnerConfig {
            max_episode_steps: 5,
            local_steps: 10,
            ..config()
        };
        // The environment never terminates; episodes end via the step limit only
        let env_config = DummyEnvConfig {
            terminal_at: None,
            reward: 1.0,
        };
        let mut runner = Runner::build(
            config,
            DummyAgent::new(2),
            env_config,
            None,
            SharedRecorder::default(),
            0,
        );
        runner.run(());

        for _ in 0..3 {
            runner.update().unwrap();
        }
        runner.stop();
        while runner.update().is_ok() {}
        let stat = runner.join().unwrap();

        assert!(stat.episodes >= 1);
        assert_eq!(stat.episode_rewards.len(), stat.episodes);
        // The boundary fires on the 6th step, after 6 rewards of 1.0
        for r in &stat.episode_rewards {
            assert_eq!(*r, 6.0);
        }
    }

    #[test]
    fn reward_log_matches_completed_episodes() {
        let env_config = DummyEnvConfig {
            terminal_at: Some(4),
            reward: 0.5,
        };
        let recorder = SharedRecorder::default();
        let mut runner = Runner::build(
            config(),
            DummyAgent::new(2),
            env_config,
            None,
            recorder.clone(),
            0,
        );
        runner.run(());

        for _ in 0..5 {
            runner.update().unwrap();
        }
        runner.stop();
        while runner.update().is_ok() {}
        let stat = runner.join().unwrap();

        assert!(stat.episodes >= 1);
        assert_eq!(stat.episode_rewards.len(), stat.episodes);
        for r in &stat.episode_rewards {
            assert_eq!(*r, 2.0);
        }

        // One episode_reward event was emitted per completed episode
        let records = recorder.0.lock().unwrap();
        assert_eq!(records.len(), stat.episodes);
        for record in records.iter() {
            assert_eq!(record.get_scalar("episode_reward").unwrap(), 2.0);
        }

        // The runtime context was bound before sampling started and the
        // merged batches reached the agent's update
        let agent = runner.agent();
        let agent = agent.lock().unwrap();
        assert!(agent.has_session);
        assert!(!agent.update_sizes.is_empty());
        assert!(agent.update_terminals.iter().any(|t| *t));
    }
}

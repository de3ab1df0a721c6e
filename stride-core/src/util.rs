//! Utility functions.
use crate::{Env, Step};
use anyhow::Result;

/// Applies `act` for `n` consecutive elementary steps and aggregates the outcome.
///
/// Rewards of the covered steps are summed. If the environment reports a
/// terminal state before `n` steps were taken, the repetition short-circuits
/// and the aggregated step carries the terminal flag. `n` must be at least 1.
pub fn repeat_action<E: Env>(env: &mut E, act: &E::Act, n: usize) -> Result<Step<E>> {
    assert!(n >= 1, "action repeat count must be at least 1");

    let mut step = env.step(act)?;
    for _ in 1..n {
        if step.is_terminal {
            break;
        }
        let next = env.step(act)?;
        step = Step::new(next.obs, step.reward + next.reward, next.is_terminal);
    }
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummy::{DummyAct, DummyEnv, DummyEnvConfig};

    #[test]
    fn sums_rewards_over_repeated_steps() {
        let config = DummyEnvConfig {
            terminal_at: None,
            reward: 0.5,
        };
        let mut env = DummyEnv::build(&config, 0).unwrap();
        env.reset().unwrap();

        let step = repeat_action(&mut env, &DummyAct(0), 4).unwrap();
        assert_eq!(step.reward, 2.0);
        assert!(!step.is_terminal);
        assert_eq!(step.obs.0, 4);
    }

    #[test]
    fn short_circuits_on_early_termination() {
        let config = DummyEnvConfig {
            terminal_at: Some(2),
            reward: 1.0,
        };
        let mut env = DummyEnv::build(&config, 0).unwrap();
        env.reset().unwrap();

        let step = repeat_action(&mut env, &DummyAct(0), 5).unwrap();
        assert_eq!(step.reward, 2.0);
        assert!(step.is_terminal);
    }
}

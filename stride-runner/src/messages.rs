use stride_core::{Env, ExperienceBatch};

/// A batch snapshot sent from an [`EpisodeRunner`](crate::EpisodeRunner)
/// to the [`UpdateCoordinator`](crate::UpdateCoordinator).
pub struct BatchMessage<E: Env> {
    /// Identifies the producing runner.
    pub id: usize,

    /// The batch snapshot, frozen at push time.
    pub batch: ExperienceBatch<E>,
}

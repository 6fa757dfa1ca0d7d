use {
    crate::error::{
        Error,
        Result,
    },
    candle_core::Tensor,
    rand::{
        rngs::StdRng,
        seq::index,
        SeedableRng,
    },
    std::collections::VecDeque,
};

/// A transition in the replay buffer.
///
/// # Fields
///
/// * `state` - The observed state before acting.
/// * `action` - The action that was taken, exploration noise included.
/// * `reward` - The reward accumulated over the frame-repeat.
/// * `next_state` - The observed state after acting.
/// * `done` - Whether the simulator ended the episode.
#[derive(Clone, Debug)]
pub struct Transition {
    state: Tensor,
    action: Tensor,
    reward: f64,
    next_state: Tensor,
    done: bool,
}
impl Transition {
    pub fn new(
        state: &Tensor,
        action: &Tensor,
        reward: f64,
        next_state: &Tensor,
        done: bool,
    ) -> Self {
        Self {
            state: state.clone(),
            action: action.clone(),
            reward,
            next_state: next_state.clone(),
            done,
        }
    }

    pub fn state(&self) -> &Tensor {
        &self.state
    }

    pub fn action(&self) -> &Tensor {
        &self.action
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn next_state(&self) -> &Tensor {
        &self.next_state
    }

    pub fn done(&self) -> bool {
        self.done
    }
}

/// A replay buffer for off-policy algorithms.
///
/// The replay buffer is implemented as a simple ring buffer / VecDeque.
///
/// # Fields
///
/// * `buffer` - The buffer of transitions, oldest first.
/// * `capacity` - The capacity of the buffer.
/// * `batch_size` - The number of transitions returned by [`ReplayBuffer::sample`].
/// * `rng` - The random number generator used for sampling.
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
    batch_size: usize,
    rng: StdRng,
}
impl ReplayBuffer {
    /// Create a new replay buffer with the given capacity and batch size.
    pub fn new(
        capacity: usize,
        batch_size: usize,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
            batch_size,
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The number of transitions currently stored.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Alias of [`ReplayBuffer::len`].
    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check if the buffer is full.
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Iterate over the stored transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }

    /// Push a transition into the buffer.
    ///
    /// If the buffer is full, the oldest transition is removed to make room for
    /// the new transition.
    pub fn add(
        &mut self,
        transition: Transition,
    ) {
        if self.capacity == 0 {
            return;
        }
        if self.is_full() {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draw `batch_size` distinct positions uniformly at random.
    pub fn sample_indices(&mut self) -> Result<Vec<usize>> {
        if self.buffer.len() < self.batch_size {
            return Err(Error::InsufficientData {
                available: self.buffer.len(),
                required: self.batch_size,
            });
        }
        Ok(index::sample(&mut self.rng, self.buffer.len(), self.batch_size).into_vec())
    }

    /// Sample a random batch of transitions without replacement.
    ///
    /// When the buffer holds fewer than `batch_size` transitions,
    /// [`Error::InsufficientData`] is returned.
    pub fn sample(&mut self) -> Result<Vec<Transition>> {
        Ok(self
            .sample_indices()?
            .into_iter()
            .map(|i| self.buffer[i].clone())
            .collect())
    }
}

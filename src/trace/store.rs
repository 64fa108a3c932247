// Read-only step history for playback

use super::Step;

/// A materialized trace: never empty, never mutated after construction.
///
/// Share it between readers with `Arc`/`Rc`; nothing can write to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StepStore<S> {
    steps: Vec<Step<S>>,
}

#[allow(clippy::len_without_is_empty)] // a store always holds at least one step
impl<S> StepStore<S> {
    /// Wrap a list of steps, or `None` if it is empty
    pub fn from_steps(steps: Vec<Step<S>>) -> Option<Self> {
        if steps.is_empty() {
            None
        } else {
            Some(StepStore { steps })
        }
    }

    /// Step at `index`, clamped to the last step
    pub fn at(&self, index: usize) -> &Step<S> {
        &self.steps[self.clamp_index(index)]
    }

    /// Step at `index`, if it exists
    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// Whether `index` is the final step
    pub fn is_terminal(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// Clamp an index into `0..=last_index()`
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    pub fn first(&self) -> &Step<S> {
        &self.steps[0]
    }

    /// The step holding the completed state
    pub fn last(&self) -> &Step<S> {
        &self.steps[self.last_index()]
    }

    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }
}

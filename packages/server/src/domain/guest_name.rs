//! Source of the numbers used for generated `Guest<n>` nicknames.

use rand::Rng;

/// Draws candidate guest numbers.
pub trait GuestNumberSource: Send + Sync {
    /// Draw a number in `1..=upper`
    fn draw(&self, upper: usize) -> usize;
}

/// Uniformly random guest numbers from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGuestNumberSource;

impl GuestNumberSource for RandomGuestNumberSource {
    fn draw(&self, upper: usize) -> usize {
        rand::rng().random_range(1..=upper.max(1))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{collections::VecDeque, sync::Mutex};

    use super::GuestNumberSource;

    /// Replays a fixed sequence, then keeps returning 1.
    pub struct ScriptedGuestNumberSource {
        numbers: Mutex<VecDeque<usize>>,
    }

    impl ScriptedGuestNumberSource {
        pub fn new(numbers: impl IntoIterator<Item = usize>) -> Self {
            Self {
                numbers: Mutex::new(numbers.into_iter().collect()),
            }
        }
    }

    impl GuestNumberSource for ScriptedGuestNumberSource {
        fn draw(&self, _upper: usize) -> usize {
            self.numbers
                .lock()
                .ok()
                .and_then(|mut numbers| numbers.pop_front())
                .unwrap_or(1)
        }
    }
}

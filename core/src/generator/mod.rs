use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for deciding where the mines of a new game go.
pub trait MineGenerator {
    fn generate(self, options: GameOptions) -> MineLayout;
}

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("piece colliding when moving falling piece")]
    Collision(PieceCollisionError),
    #[display("session is not accepting input")]
    NotPlaying,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CheatError {
    #[display("invalid cheat code: {code:?}")]
    Unknown { code: String },
    #[display("cheat already entered: {cheat}")]
    AlreadyActive { cheat: Cheat },
    #[display("cheat not active: {cheat}")]
    NotActive { cheat: Cheat },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RestoreError {
    #[display("locked piece #{id} has a cell outside the grid at ({x}, {y})")]
    OutOfBounds { id: usize, x: i32, y: i32 },
    #[display("locked piece #{id} overlaps an occupied cell at ({x}, {y})")]
    Overlap { id: usize, x: i32, y: i32 },
}

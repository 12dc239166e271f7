pub mod body;
pub mod gravity;
pub mod merge;
pub mod simulation;
pub mod time;

pub mod export;
pub mod integrate;
pub mod noise;
pub mod report;
pub mod signal;
pub mod simulation;

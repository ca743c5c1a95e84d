pub mod config;
pub mod emission;
pub mod outcome;
pub mod rules;

// Application layer - Generation and refresh use cases
pub mod campaign_source;
pub mod generator;
pub mod random_source;
pub mod scheduler;

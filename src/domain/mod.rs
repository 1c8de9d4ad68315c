// Domain layer - Campaign metric models
pub mod campaign;
pub mod dashboard;
pub mod profile;
pub mod revenue_series;

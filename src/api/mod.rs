//! HTTP API: router assembly and the training surface.

pub mod routes;
pub mod training;

pub use routes::create_router;
pub use training::TrainingState;

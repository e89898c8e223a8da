//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode during engine startup and the
//! simulation run so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cellswitch_core::config::ConfigError,
    },

    /// The behavior module could not be built from its configuration.
    #[error("behavior error: {source}")]
    Behavior {
        /// The underlying cell error.
        #[from]
        source: cellswitch_agents::CellError,
    },

    /// Seeding the initial population failed.
    #[error("seeding error: {source}")]
    Seeding {
        /// The underlying population error.
        #[from]
        source: cellswitch_core::population::PopulationError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: cellswitch_core::runner::RunnerError,
    },

    /// The logging subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },

    /// The final population report could not be serialized.
    #[error("report error: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

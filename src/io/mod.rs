/// Command-line adapter driving a designer session
pub mod cli;
/// Designer constants and runtime configuration defaults
pub mod configuration;
/// Error types and helper constructors
pub mod error;
/// Rendering collaborator and PNG swatch export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Plain-text audit of per-color counts
pub mod report;

/// Error to HTTP response mapping
pub mod error_handling;
/// Caller identity extractors
pub mod identity;

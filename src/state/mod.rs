/// State management module
///
/// This module handles all session state:
/// - The original/filtered image pair and its operations (session.rs)
/// - Filter and export settings with JSON persistence (settings.rs)

pub mod session;
pub mod settings;

pub mod pedal_updater_config;
pub mod pretty_print_progress;
pub mod prompt;
pub mod workflow;

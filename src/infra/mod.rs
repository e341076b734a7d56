pub mod file_system;
pub mod ignore_rules;
pub mod logger;
pub mod output;
pub mod prompt;

pub mod content_loader;
pub mod context_generator;
pub mod file_tree;

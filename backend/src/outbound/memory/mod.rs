//! Process-local storage adapters.

mod in_memory_user_directory;
mod user_directory_error_mapping;

pub use in_memory_user_directory::InMemoryUserDirectory;

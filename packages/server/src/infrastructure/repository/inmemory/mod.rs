//! In-memory repositories.

mod history;

pub use history::InMemoryHistoryRepository;

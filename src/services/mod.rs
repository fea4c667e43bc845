pub mod commit_history;

pub use commit_history::CommitHistoryService;

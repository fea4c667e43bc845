pub mod change;
pub mod exclusion;
pub mod fragment;
pub mod repository;
pub mod scope;
pub mod target;

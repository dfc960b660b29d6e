pub mod core;
pub mod exports;
pub mod stats;
pub mod students;

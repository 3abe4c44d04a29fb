pub mod task;

pub use task::TaskCountRecord;

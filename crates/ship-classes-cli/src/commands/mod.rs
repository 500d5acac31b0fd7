pub mod classes;
pub mod logs;
pub mod schedule;
pub mod show;
pub mod sync;

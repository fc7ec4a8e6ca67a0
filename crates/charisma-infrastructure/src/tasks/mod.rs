//! Background task execution

pub mod worker;

pub use worker::WorkerTaskQueue;

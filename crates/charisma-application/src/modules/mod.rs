//! Application modules
//!
//! Each `*_service.rs` and `*_controller.rs` file registers itself with
//! [`register_module!`](crate::register_module); the scanner derives its
//! registration key from the file name.

/// Application-level resource modules
pub mod application;

//! Users resource
//!
//! | File | Registers |
//! |------|-----------|
//! | `users_service.rs` | `usersService` |
//! | `users_controller.rs` | `usersController` |

pub mod users_constants;
pub mod users_controller;
pub mod users_dtos;
pub mod users_service;

pub use users_controller::UsersController;
pub use users_service::UsersService;

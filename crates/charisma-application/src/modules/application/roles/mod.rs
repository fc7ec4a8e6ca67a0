//! Roles resource
//!
//! | File | Registers |
//! |------|-----------|
//! | `roles_service.rs` | `rolesService` |
//! | `roles_controller.rs` | `rolesController` |

pub mod roles_constants;
pub mod roles_controller;
pub mod roles_dtos;
pub mod roles_service;

pub use roles_controller::RolesController;
pub use roles_service::RolesService;

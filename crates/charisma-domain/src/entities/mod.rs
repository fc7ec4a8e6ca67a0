//! Domain Entities
//!
//! Documents with identity managed by the storage port.
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Role`] | Named permission set, optionally scoped to a business |
//! | [`User`] | Account holder with contact details and an assigned role |

/// Role entity
pub mod role;
/// User entity
pub mod user;

pub use role::{Role, RoleStatus};
pub use user::{Address, GeoPoint, PointKind, User, UserStatus};

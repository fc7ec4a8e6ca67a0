//! Domain Value Objects
//!
//! Immutable values without identity, compared by their attributes.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`RequestIdentity`] | Verified caller identity attached to a request |
//! | [`CacheSettings`], [`TokenSettings`], [`TaskSettings`] | Settings registered as container values |
//! | [`Pagination`], [`Page`] | Page requests and page results |
//! | [`RoleFilter`], [`UserFilter`] | List query filters and sort options |

/// Caller identity value objects
pub mod identity;
/// Pagination value objects
pub mod pagination;
/// List query filters
pub mod query;
/// Settings value objects
pub mod settings;

pub use identity::{Claims, RequestIdentity};
pub use pagination::{Page, PageInfo, Pagination};
pub use query::{
    DateRange, GeoRadius, RoleFilter, RoleSortField, Sort, SortOrder, UserFilter, UserSortField,
};
pub use settings::{CacheSettings, TaskSettings, TokenSettings};

//! List query filters
//!
//! Filters are plain values built by controllers and evaluated by storage
//! providers through [`RoleFilter::matches`] and [`UserFilter::matches`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{GeoPoint, Role, RoleStatus, User, UserStatus};
use crate::error::{Error, Result};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    #[default]
    Desc,
}

impl SortOrder {
    /// Apply the direction to an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(Error::invalid_argument(format!(
                "sortOrder must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Field and direction to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort<F> {
    /// Sort field
    pub field: F,
    /// Sort direction
    pub order: SortOrder,
}

/// Sortable role fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoleSortField {
    /// `createdAt`
    #[default]
    CreatedAt,
    /// `name`
    Name,
    /// `status`
    Status,
}

impl RoleSortField {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::Name => "name",
            Self::Status => "status",
        }
    }

    /// Ascending comparison of two roles on this field
    pub fn compare(self, a: &Role, b: &Role) -> Ordering {
        match self {
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Name => a.name.cmp(&b.name),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl FromStr for RoleSortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "name" => Ok(Self::Name),
            "status" => Ok(Self::Status),
            other => Err(Error::invalid_argument(format!(
                "cannot sort roles by '{other}'"
            ))),
        }
    }
}

impl fmt::Display for RoleSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sortable user fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserSortField {
    /// `createdAt`
    #[default]
    CreatedAt,
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `email`
    Email,
    /// `status`
    Status,
}

impl UserSortField {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Status => "status",
        }
    }

    /// Ascending comparison of two users on this field
    pub fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::FirstName => a.first_name.cmp(&b.first_name),
            Self::LastName => a.last_name.cmp(&b.last_name),
            Self::Email => a.email.cmp(&b.email),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

impl FromStr for UserSortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "createdAt" => Ok(Self::CreatedAt),
            "firstName" => Ok(Self::FirstName),
            "lastName" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            other => Err(Error::invalid_argument(format!(
                "cannot sort users by '{other}'"
            ))),
        }
    }
}

impl fmt::Display for UserSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive creation date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Whether a timestamp falls inside the range
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Geo radius filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoRadius {
    /// Centre of the search
    pub center: GeoPoint,
    /// Radius in kilometres
    pub radius_km: f64,
}

fn name_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter for role list queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleFilter {
    /// Exact status
    pub status: Option<RoleStatus>,
    /// Owning business
    pub business_id: Option<String>,
    /// Creator user id
    pub created_by: Option<String>,
    /// Required permission
    pub permission: Option<String>,
    /// Case-insensitive name substring
    pub search_term: Option<String>,
    /// Creation date range
    pub date_range: DateRange,
    /// Sort options
    pub sort: Sort<RoleSortField>,
}

impl RoleFilter {
    /// Whether a role satisfies every set criterion
    pub fn matches(&self, role: &Role) -> bool {
        self.status.is_none_or(|s| role.status == s)
            && self
                .business_id
                .as_deref()
                .is_none_or(|b| role.business_id.as_deref() == Some(b))
            && self
                .created_by
                .as_deref()
                .is_none_or(|c| role.created_by.as_deref() == Some(c))
            && self
                .permission
                .as_deref()
                .is_none_or(|p| role.has_permission(p))
            && self
                .search_term
                .as_deref()
                .is_none_or(|t| name_contains(&role.name, t))
            && self.date_range.contains(&role.created_at)
    }

    /// Order two roles by the configured sort
    pub fn compare(&self, a: &Role, b: &Role) -> Ordering {
        self.sort.order.apply(self.sort.field.compare(a, b))
    }
}

/// Filter for user list queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Exact status
    pub status: Option<UserStatus>,
    /// Assigned role id
    pub role: Option<String>,
    /// Case-insensitive substring of name, email or phone
    pub search_term: Option<String>,
    /// Creation date range
    pub date_range: DateRange,
    /// Only users located within a radius
    pub near: Option<GeoRadius>,
    /// Sort options
    pub sort: Sort<UserSortField>,
}

impl UserFilter {
    /// Whether a user satisfies every set criterion
    pub fn matches(&self, user: &User) -> bool {
        self.status.is_none_or(|s| user.status == s)
            && self.role.as_deref().is_none_or(|r| user.role == r)
            && self.search_term.as_deref().is_none_or(|t| {
                name_contains(&user.first_name, t)
                    || user.last_name.as_deref().is_some_and(|l| name_contains(l, t))
                    || user.email.as_deref().is_some_and(|e| name_contains(e, t))
                    || user.phone.contains(t)
            })
            && self.date_range.contains(&user.created_at)
            && self.near.is_none_or(|near| {
                user.location()
                    .is_some_and(|at| at.distance_km(&near.center) <= near.radius_km)
            })
    }

    /// Order two users by the configured sort
    pub fn compare(&self, a: &User, b: &User) -> Ordering {
        self.sort.order.apply(self.sort.field.compare(a, b))
    }
}

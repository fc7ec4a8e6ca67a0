//! Roles request and response DTOs

use charisma_domain::constants::{DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use charisma_domain::entities::{Role, RoleStatus};
use charisma_domain::error::Result;
use charisma_domain::value_objects::{
    DateRange, Page, PageInfo, Pagination, RoleFilter, RoleSortField, Sort, SortOrder,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::cache::key_part;
use crate::dispatch::RequestContext;
use crate::validation::{validate_permissions, validated};

/// Body of `POST /roles`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRoleRequest {
    /// Unique role name
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Initial status
    #[serde(default)]
    pub status: RoleStatus,
    /// Creating user id
    pub created_by: String,
    /// Granted permissions
    #[serde(default)]
    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Vec<String>,
    /// Owning business
    pub business_id: Option<String>,
}

/// Body of `PATCH /roles/<id>`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateRoleRequest {
    /// New name
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    /// New status
    pub status: Option<RoleStatus>,
    /// Replacement permissions
    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Option<Vec<String>>,
    /// New owning business
    pub business_id: Option<String>,
}

/// Body of `PATCH /roles/<id>/permissions`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdatePermissionsRequest {
    /// Replacement permissions
    #[validate(custom(function = "validate_permissions"))]
    pub permissions: Vec<String>,
}

/// Query of the role list endpoints
#[derive(Debug, Clone, Validate)]
pub struct RoleListQuery {
    /// Page number
    #[validate(range(min = 1))]
    pub page: u64,
    /// Page size
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    /// Status filter
    pub status: Option<RoleStatus>,
    /// Business filter
    pub business_id: Option<String>,
    /// Name substring
    #[validate(length(max = 100))]
    pub search_term: Option<String>,
    /// Created on or after
    pub date_from: Option<NaiveDate>,
    /// Created on or before
    pub date_to: Option<NaiveDate>,
    /// Sort field
    pub sort_by: RoleSortField,
    /// Sort direction
    pub sort_order: SortOrder,
}

impl RoleListQuery {
    /// Parse and validate the list query of a request
    pub fn from_context(ctx: &RequestContext) -> Result<Self> {
        validated(Self {
            page: ctx.query_parse("page")?.unwrap_or(DEFAULT_PAGE),
            limit: ctx.query_parse("limit")?.unwrap_or(DEFAULT_PAGE_LIMIT),
            status: ctx.query_parse("status")?,
            business_id: ctx.query_str("businessId").map(str::to_owned),
            search_term: ctx.query_str("searchTerm").map(str::to_owned),
            date_from: ctx.query_parse("dateFrom")?,
            date_to: ctx.query_parse("dateTo")?,
            sort_by: ctx.query_parse("sortBy")?.unwrap_or_default(),
            sort_order: ctx.query_parse("sortOrder")?.unwrap_or_default(),
        })
    }

    /// Requested page
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }

    /// Filter built from the query
    pub fn filter(&self) -> RoleFilter {
        RoleFilter {
            status: self.status,
            business_id: self.business_id.clone(),
            search_term: self.search_term.clone(),
            date_range: DateRange {
                from: self.date_from,
                to: self.date_to,
            },
            sort: Sort {
                field: self.sort_by,
                order: self.sort_order,
            },
            ..RoleFilter::default()
        }
    }

    /// Cache key segments shared by every list family
    pub fn key_segments(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.page,
            self.limit,
            key_part(self.status),
            key_part(self.business_id.as_deref()),
            key_part(self.search_term.as_deref()),
            key_part(self.date_from),
            key_part(self.date_to),
            self.sort_by,
            self.sort_order,
        )
    }
}

/// Response of the role list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleList {
    /// Roles on the page
    pub roles: Vec<Role>,
    /// Pagination metadata
    pub pagination: PageInfo,
}

impl From<Page<Role>> for RoleList {
    fn from(page: Page<Role>) -> Self {
        Self {
            roles: page.items,
            pagination: page.pagination,
        }
    }
}

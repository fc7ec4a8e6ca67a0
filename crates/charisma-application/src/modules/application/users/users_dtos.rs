//! Users request and response DTOs

use charisma_domain::constants::{DEFAULT_GEO_RADIUS_KM, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT};
use charisma_domain::entities::{Address, GeoPoint, User, UserStatus};
use charisma_domain::error::Result;
use charisma_domain::value_objects::{
    DateRange, GeoRadius, Page, PageInfo, Pagination, Sort, SortOrder, UserFilter, UserSortField,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::users_constants::PHONE_PATTERN;
use crate::cache::key_part;
use crate::dispatch::RequestContext;
use crate::validation::validated;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

fn validate_location(point: &GeoPoint) -> std::result::Result<(), ValidationError> {
    GeoPoint::new(point.longitude(), point.latitude())
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("coordinates")
                .with_message("Coordinates must be [longitude, latitude] with valid ranges".into())
        })
}

/// Address part of a user request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddressInput {
    /// Street line
    pub street: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or region
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// GeoJSON point
    #[validate(custom(function = "validate_location"))]
    pub location: Option<GeoPoint>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<AddressInput> for Address {
    fn from(input: AddressInput) -> Self {
        Self {
            street: trimmed(input.street),
            city: trimmed(input.city),
            state: trimmed(input.state),
            country: trimmed(input.country),
            postal_code: trimmed(input.postal_code),
            location: input.location,
        }
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Given name
    #[validate(length(min = 2, max = 50))]
    pub first_name: String,
    /// Family name
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    /// Email address
    #[validate(email)]
    pub email: Option<String>,
    /// Phone number
    #[validate(regex(path = *PHONE_RE))]
    pub phone: String,
    /// Plaintext password, hashed before storage
    #[validate(length(min = 6))]
    pub password: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address
    #[validate(nested)]
    pub address: Option<AddressInput>,
    /// Profile picture URL
    #[validate(url)]
    pub profile_picture: Option<String>,
    /// Initial status
    pub status: Option<UserStatus>,
    /// Assigned role id
    #[validate(length(min = 1))]
    pub role: String,
}

/// Body of `PATCH /users/<id>`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// Given name
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    /// Family name
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    /// Email address
    #[validate(email)]
    pub email: Option<String>,
    /// Phone number
    #[validate(regex(path = *PHONE_RE))]
    pub phone: Option<String>,
    /// New plaintext password
    #[validate(length(min = 6))]
    pub password: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address (replaces the stored one)
    #[validate(nested)]
    pub address: Option<AddressInput>,
    /// Profile picture URL
    #[validate(url)]
    pub profile_picture: Option<String>,
    /// Account status
    pub status: Option<UserStatus>,
    /// Assigned role id
    #[validate(length(min = 1))]
    pub role: Option<String>,
}

/// Body of `PATCH /users/me`
///
/// Same as [`UpdateUserRequest`] without the fields a user may not change
/// on their own account.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateMeRequest {
    /// Given name
    #[validate(length(min = 2, max = 50))]
    pub first_name: Option<String>,
    /// Family name
    #[validate(length(min = 2, max = 50))]
    pub last_name: Option<String>,
    /// Email address
    #[validate(email)]
    pub email: Option<String>,
    /// Phone number
    #[validate(regex(path = *PHONE_RE))]
    pub phone: Option<String>,
    /// New plaintext password
    #[validate(length(min = 6))]
    pub password: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address
    #[validate(nested)]
    pub address: Option<AddressInput>,
    /// Profile picture URL
    #[validate(url)]
    pub profile_picture: Option<String>,
}

impl From<UpdateMeRequest> for UpdateUserRequest {
    fn from(me: UpdateMeRequest) -> Self {
        Self {
            first_name: me.first_name,
            last_name: me.last_name,
            email: me.email,
            phone: me.phone,
            password: me.password,
            date_of_birth: me.date_of_birth,
            address: me.address,
            profile_picture: me.profile_picture,
            status: None,
            role: None,
        }
    }
}

/// Query of `GET /users`
#[derive(Debug, Clone, Validate)]
pub struct UserListQuery {
    /// Page number
    #[validate(range(min = 1))]
    pub page: u64,
    /// Page size
    #[validate(range(min = 1, max = 100))]
    pub limit: u64,
    /// Status filter
    pub status: Option<UserStatus>,
    /// Role filter
    pub role: Option<String>,
    /// Name, email or phone substring
    #[validate(length(max = 100))]
    pub search_term: Option<String>,
    /// Created on or after
    pub date_from: Option<NaiveDate>,
    /// Created on or before
    pub date_to: Option<NaiveDate>,
    /// Latitude of the search centre
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    /// Longitude of the search centre
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    /// Search radius in kilometres
    #[validate(range(exclusive_min = 0.0))]
    pub radius: f64,
    /// Sort field
    pub sort_by: UserSortField,
    /// Sort direction
    pub sort_order: SortOrder,
}

impl UserListQuery {
    /// Parse and validate the list query of a request
    pub fn from_context(ctx: &RequestContext) -> Result<Self> {
        validated(Self {
            page: ctx.query_parse("page")?.unwrap_or(DEFAULT_PAGE),
            limit: ctx.query_parse("limit")?.unwrap_or(DEFAULT_PAGE_LIMIT),
            status: ctx.query_parse("status")?,
            role: ctx.query_str("role").map(str::to_owned),
            search_term: ctx.query_str("searchTerm").map(str::to_owned),
            date_from: ctx.query_parse("dateFrom")?,
            date_to: ctx.query_parse("dateTo")?,
            latitude: ctx.query_parse("latitude")?,
            longitude: ctx.query_parse("longitude")?,
            radius: ctx.query_parse("radius")?.unwrap_or(DEFAULT_GEO_RADIUS_KM),
            sort_by: ctx.query_parse("sortBy")?.unwrap_or_default(),
            sort_order: ctx.query_parse("sortOrder")?.unwrap_or_default(),
        })
    }

    /// Requested page
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.limit)
    }

    /// Filter built from the query
    ///
    /// The geo radius applies only when both coordinates are given.
    pub fn filter(&self) -> Result<UserFilter> {
        let near = match (self.longitude, self.latitude) {
            (Some(lon), Some(lat)) => Some(GeoRadius {
                center: GeoPoint::new(lon, lat)?,
                radius_km: self.radius,
            }),
            _ => None,
        };
        Ok(UserFilter {
            status: self.status,
            role: self.role.clone(),
            search_term: self.search_term.clone(),
            date_range: DateRange {
                from: self.date_from,
                to: self.date_to,
            },
            near,
            sort: Sort {
                field: self.sort_by,
                order: self.sort_order,
            },
        })
    }

    /// Cache key for this query
    pub fn cache_key(&self) -> String {
        format!(
            "users:list:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}:{}",
            self.page,
            self.limit,
            key_part(self.status),
            key_part(self.role.as_deref()),
            key_part(self.search_term.as_deref()),
            key_part(self.date_from),
            key_part(self.date_to),
            key_part(self.latitude),
            key_part(self.longitude),
            self.radius,
            self.sort_by,
            self.sort_order,
        )
    }
}

/// Response of `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserList {
    /// Users on the page
    pub users: Vec<User>,
    /// Pagination metadata
    pub pagination: PageInfo,
}

impl From<Page<User>> for UserList {
    fn from(page: Page<User>) -> Self {
        Self {
            users: page.items,
            pagination: page.pagination,
        }
    }
}

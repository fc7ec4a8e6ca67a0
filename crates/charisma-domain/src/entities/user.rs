//! User entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius used for great-circle distances
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Registered but not yet activated
    #[default]
    Pending,
    /// Active account
    Active,
    /// Dormant account
    Inactive,
    /// Account disabled by the user or an operator
    Disabled,
}

impl UserStatus {
    /// Wire representation of the status
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "disabled" => Ok(Self::Disabled),
            other => Err(Error::invalid_argument(format!(
                "unknown user status '{other}'"
            ))),
        }
    }
}

/// GeoJSON point stored as `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Always `"Point"`
    #[serde(rename = "type", default)]
    pub kind: PointKind,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

/// GeoJSON geometry tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointKind {
    /// The only supported geometry
    #[default]
    Point,
}

impl GeoPoint {
    /// Create a point, rejecting out-of-range coordinates
    pub fn new(longitude: f64, latitude: f64) -> Result<Self> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::invalid_argument(
                "Coordinates must be [longitude, latitude] with valid ranges",
            ));
        }
        Ok(Self {
            kind: PointKind::Point,
            coordinates: [longitude, latitude],
        })
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Great-circle distance to another point in kilometres (haversine)
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let (lat1, lat2) = (self.latitude().to_radians(), other.latitude().to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude() - self.longitude()).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// Postal address with an optional location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
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
    /// Geographic location
    pub location: Option<GeoPoint>,
}

/// An account holder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: Option<String>,
    /// Unique, lower-cased email address
    pub email: Option<String>,
    /// Unique phone number
    pub phone: String,
    /// Credential; never serialized
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
    /// Postal address
    pub address: Option<Address>,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    /// Account status
    pub status: UserStatus,
    /// Whether the email address was verified
    pub is_email_verified: bool,
    /// Whether the phone number was verified
    pub is_phone_verified: bool,
    /// Last successful login
    pub last_login_at: Option<DateTime<Utc>>,
    /// Identifier of the assigned role
    pub role: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a pending user with a fresh identifier
    pub fn new<F: Into<String>, P: Into<String>, R: Into<String>>(
        first_name: F,
        phone: P,
        role: R,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: first_name.into(),
            last_name: None,
            email: None,
            phone: phone.into(),
            password: None,
            date_of_birth: None,
            address: None,
            profile_picture: None,
            status: UserStatus::default(),
            is_email_verified: false,
            is_phone_verified: false,
            last_login_at: None,
            role: role.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Location of the user's address, if any
    pub fn location(&self) -> Option<&GeoPoint> {
        self.address.as_ref().and_then(|a| a.location.as_ref())
    }

    /// Full display name
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Mark the user as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

//! Data Transfer Objects for the HTTP API.
//!
//! Request parameter structs arrive loosely typed (query strings, JSON) and
//! are validated here into the service-layer query types before any store
//! access. Validation collects every field issue instead of stopping at the
//! first one.
//!
//! The two GET surfaces use different parameter casings: the basic endpoint
//! takes snake_case query params, the staff-aware endpoint camelCase. Issue
//! fields always report the camelCase wire name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FieldIssue;
use crate::api::AvailabilitySlot;
use crate::models::{LocationId, OfferingId, ResourceId};
use crate::services::{AvailabilityQuery, StaffAvailabilityQuery};

/// Query parameters of `GET /v1/availability` (snake_case surface).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicAvailabilityParams {
    pub location_id: Option<String>,
    pub offering_id: Option<String>,
    pub date: Option<String>,
    pub duration: Option<String>,
}

/// JSON body of `POST /v1/availability`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicAvailabilityRequest {
    pub location_id: Option<String>,
    pub offering_id: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
}

/// Query parameters of `GET /v1/availability/enhanced` (camelCase surface).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedAvailabilityParams {
    pub location_id: Option<String>,
    pub offering_id: Option<String>,
    pub date: Option<String>,
    pub staff_id: Option<String>,
    /// Literal string "true" enables aggregation; anything else does not.
    pub aggregated: Option<String>,
    pub duration: Option<String>,
}

/// Response of the basic availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub slots: Vec<AvailabilitySlot>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

impl BasicAvailabilityParams {
    /// Validate into a service query, collecting all field issues.
    pub fn validate(&self) -> Result<AvailabilityQuery, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let location_id = parse_uuid("locationId", self.location_id.as_deref(), &mut issues);
        let offering_id = parse_uuid("offeringId", self.offering_id.as_deref(), &mut issues);
        let date = parse_date(self.date.as_deref(), &mut issues);
        let duration = parse_duration_param(self.duration.as_deref(), &mut issues);

        match (location_id, offering_id, date) {
            (Some(location_id), Some(offering_id), Some(date)) if issues.is_empty() => {
                Ok(AvailabilityQuery {
                    location_id: LocationId::new(location_id),
                    offering_id: OfferingId::new(offering_id),
                    date,
                    duration,
                })
            }
            _ => Err(issues),
        }
    }
}

impl BasicAvailabilityRequest {
    /// Validate into a service query, collecting all field issues.
    pub fn validate(&self) -> Result<AvailabilityQuery, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let location_id = parse_uuid("locationId", self.location_id.as_deref(), &mut issues);
        let offering_id = parse_uuid("offeringId", self.offering_id.as_deref(), &mut issues);
        let date = parse_date(self.date.as_deref(), &mut issues);
        let duration = validate_duration(self.duration, &mut issues);

        match (location_id, offering_id, date) {
            (Some(location_id), Some(offering_id), Some(date)) if issues.is_empty() => {
                Ok(AvailabilityQuery {
                    location_id: LocationId::new(location_id),
                    offering_id: OfferingId::new(offering_id),
                    date,
                    duration,
                })
            }
            _ => Err(issues),
        }
    }
}

impl EnhancedAvailabilityParams {
    /// Validate into a service query, collecting all field issues.
    pub fn validate(&self) -> Result<StaffAvailabilityQuery, Vec<FieldIssue>> {
        let mut issues = Vec::new();

        let location_id = parse_uuid("locationId", self.location_id.as_deref(), &mut issues);
        let offering_id = parse_uuid("offeringId", self.offering_id.as_deref(), &mut issues);
        let date = parse_date(self.date.as_deref(), &mut issues);
        let staff_id = match self.staff_id.as_deref() {
            Some(raw) => parse_uuid("staffId", Some(raw), &mut issues).map(ResourceId::new),
            None => None,
        };
        let duration = parse_duration_param(self.duration.as_deref(), &mut issues);
        let aggregated = self.aggregated.as_deref() == Some("true");

        match (location_id, offering_id, date) {
            (Some(location_id), Some(offering_id), Some(date)) if issues.is_empty() => {
                Ok(StaffAvailabilityQuery {
                    location_id: LocationId::new(location_id),
                    offering_id: OfferingId::new(offering_id),
                    date,
                    staff_id,
                    aggregated,
                    duration,
                })
            }
            _ => Err(issues),
        }
    }
}

fn parse_uuid(field: &str, value: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<Uuid> {
    match value {
        None => {
            issues.push(FieldIssue::new(field, "Required"));
            None
        }
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                issues.push(FieldIssue::new(field, "Invalid uuid"));
                None
            }
        },
    }
}

fn parse_date(value: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<NaiveDate> {
    let Some(raw) = value else {
        issues.push(FieldIssue::new("date", "Required"));
        return None;
    };

    // Strict YYYY-MM-DD shape; chrono alone would also accept e.g. 2025-3-4
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    match shaped
        .then(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .flatten()
    {
        Some(date) => Some(date),
        None => {
            issues.push(FieldIssue::new("date", "Invalid date, expected YYYY-MM-DD"));
            None
        }
    }
}

fn parse_duration_param(value: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<i64> {
    match value {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(minutes) => validate_duration(Some(minutes), issues),
            Err(_) => {
                issues.push(FieldIssue::new(
                    "duration",
                    "Duration must be a positive integer",
                ));
                None
            }
        },
    }
}

fn validate_duration(value: Option<i64>, issues: &mut Vec<FieldIssue>) -> Option<i64> {
    match value {
        None => None,
        Some(minutes) if minutes > 0 => Some(minutes),
        Some(_) => {
            issues.push(FieldIssue::new(
                "duration",
                "Duration must be a positive integer",
            ));
            None
        }
    }
}

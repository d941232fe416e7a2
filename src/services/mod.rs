//! High-level business logic of the availability engine.
//!
//! The modules here are the computational core of the backend:
//!
//! - [`slots`]: candidate-slot generation and conflict resolution, shared by
//!   both availability paths
//! - [`availability`]: the basic, location-wide availability computation
//! - [`staff`]: the staff-aware computation with per-resource breakdown and
//!   the aggregated capacity rollup
//!
//! Every computation is a single synchronous request-response cycle over
//! rows fetched fresh from the repository; nothing here caches or mutates.

pub mod availability;
pub mod slots;
pub mod staff;

pub use availability::{location_availability, AvailabilityError, AvailabilityQuery};
pub use slots::{slot_is_free, slot_windows, ResourceScope, SlotWindow, SLOT_STRIDE_MINUTES};
pub use staff::{staff_availability, StaffAvailabilityQuery};

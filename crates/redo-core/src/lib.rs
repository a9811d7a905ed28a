//! # Redo Core Library
//!
//! The data model and recurrence engine behind the `redo` to-do list: tasks with
//! optional due dates, reminders and repeating patterns.
//!
//! ## Features
//!
//! - **Recurrence Engine**: daily, weekly (with weekday selection and week-skip
//!   intervals) and monthly patterns with optional end dates
//! - **Instance Factory**: builds the next task in a recurrence chain when the
//!   current one is completed
//! - **Readable Labels**: long phrases ("Weekly on Mon, Wed & Fri") and compact
//!   badges ("MWF") for any pattern
//! - **Legacy Migration**: older stored pattern shapes are mapped onto the
//!   current schema on load, with dropped patterns reported rather than lost
//!   silently
//! - **JSON Storage**: a single-file task repository
//!
//! ## Core Modules
//!
//! - [`models`]: Core data structures
//! - [`calendar`]: Pure date arithmetic
//! - [`recurrence`]: Occurrence calculation and next-instance construction
//! - [`label`]: Pattern labels for display
//! - [`migration`]: Legacy pattern normalization
//! - [`repository`]: Task storage with the Repository pattern
//! - [`timezone`]: Timezone utilities and validation
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use redo_core::label::{long_label, short_label};
//! use redo_core::models::{RecurrencePattern, Task};
//! use redo_core::recurrence::{build_next_instance, next_occurrence, Occurrence};
//!
//! let pattern = RecurrencePattern::weekly_on(1, &[1, 3, 5]);
//! assert_eq!(long_label(&pattern), "Weekly on Mon, Wed & Fri");
//! assert_eq!(short_label(&pattern), "MWF");
//!
//! // 2024-01-15 is a Monday
//! let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! assert_eq!(
//!     next_occurrence(monday, &pattern),
//!     Occurrence::Next(NaiveDate::from_ymd_opt(2024, 1, 17).unwrap())
//! );
//!
//! let task = Task {
//!     text: "Gym".to_string(),
//!     due_date: Some(Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()),
//!     recurrence: Some(pattern),
//!     is_recurring: true,
//!     ..Default::default()
//! };
//! let next = build_next_instance(&task, &Utc::now()).unwrap();
//! assert_eq!(next.recurrence_count, 1);
//! assert_eq!(next.parent_recurrence_id, Some(task.id));
//! ```

pub mod calendar;
pub mod error;
pub mod label;
pub mod migration;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod timezone;

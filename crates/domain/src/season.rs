// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// A bounded period over which XP and rankings are scoped.
///
/// At most one season is active at a time; the persistence layer
/// enforces this when activating a season, not a database constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the season has not been persisted yet.
    season_id: Option<i64>,
    /// URL-safe identifier (e.g. "2026-summer").
    slug: String,
    /// Human-readable name.
    name: String,
    /// First day of the season.
    start_date: Date,
    /// Last day of the season. `None` means the season is ongoing.
    end_date: Option<Date>,
    /// Whether this is the active season.
    is_active: bool,
}

impl Season {
    /// Creates a new `Season` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `slug` - URL-safe identifier
    /// * `name` - Human-readable name
    /// * `start_date` - First day of the season
    /// * `end_date` - Last day, or `None` for an ongoing season
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is empty or the end date precedes
    /// the start date.
    pub fn new(
        slug: &str,
        name: &str,
        start_date: Date,
        end_date: Option<Date>,
    ) -> Result<Self, DomainError> {
        Self::validate_fields(slug, start_date, end_date)?;
        Ok(Self {
            season_id: None,
            slug: slug.to_string(),
            name: name.to_string(),
            start_date,
            end_date,
            is_active: false,
        })
    }

    /// Creates a `Season` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `season_id` - The canonical numeric identifier
    /// * `slug` - URL-safe identifier
    /// * `name` - Human-readable name
    /// * `start_date` - First day of the season
    /// * `end_date` - Last day, or `None` for an ongoing season
    /// * `is_active` - Whether this is the active season
    ///
    /// # Errors
    ///
    /// Returns an error if the slug is empty or the end date precedes
    /// the start date.
    pub fn with_id(
        season_id: i64,
        slug: &str,
        name: &str,
        start_date: Date,
        end_date: Option<Date>,
        is_active: bool,
    ) -> Result<Self, DomainError> {
        Self::validate_fields(slug, start_date, end_date)?;
        Ok(Self {
            season_id: Some(season_id),
            slug: slug.to_string(),
            name: name.to_string(),
            start_date,
            end_date,
            is_active,
        })
    }

    fn validate_fields(
        slug: &str,
        start_date: Date,
        end_date: Option<Date>,
    ) -> Result<(), DomainError> {
        if slug.trim().is_empty() {
            return Err(DomainError::InvalidSeasonSlug(
                "Season slug cannot be empty".to_string(),
            ));
        }
        if let Some(end) = end_date
            && end < start_date
        {
            return Err(DomainError::InvalidSeasonDates {
                slug: slug.to_string(),
                reason: format!("end date {end} precedes start date {start_date}"),
            });
        }
        Ok(())
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn season_id(&self) -> Option<i64> {
        self.season_id
    }

    /// Returns the slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first day of the season.
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the last day of the season, if bounded.
    #[must_use]
    pub const fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Returns whether this is the active season.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the season has no end date.
    #[must_use]
    pub const fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

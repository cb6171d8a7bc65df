//! # Track geometry
//!
//! A track is a chain of segments, each linking forward to the next segment in the direction of
//! travel. On a closed circuit the last segment links back to the first. Tracks are immutable once
//! loaded and may be shared between any number of drivers.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A loaded track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Name of the track
    pub name: String,

    /// Segments of the track, the segment ID is its index in this list.
    pub segments: Vec<TrackSegment>,
}

/// A single segment of track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSegment {
    /// Shape of the segment.
    pub kind: SegmentKind,

    /// Width of the track surface.
    ///
    /// Units: meters
    pub width_m: f64,

    /// Coefficient of friction of the surface.
    pub friction: f64,

    /// Heading of the track tangent at the start of the segment.
    ///
    /// Units: radians
    pub start_angle_rad: f64,

    /// ID of the next segment in the direction of travel.
    pub next: Option<usize>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Shape of a track segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentKind {
    /// A straight with the given length in meters.
    Straight { length_m: f64 },

    /// A constant radius turn.
    Turn {
        direction: TurnDirection,

        /// Total angle swept by the segment.
        ///
        /// Units: radians
        arc_rad: f64,

        /// Radius of the centreline.
        ///
        /// Units: meters
        radius_m: f64,
    },
}

/// Direction of a turn.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    Right,
}

/// Errors raised while navigating a track.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackError {
    #[error("The track contains no segments")]
    Empty,

    #[error("No segment with ID {0} exists on the track")]
    UnknownSegment(usize),

    #[error("Segment {0} does not link to a valid next segment")]
    BrokenChain(usize),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Track {
    /// Create a new track from a list of segments.
    pub fn new(name: &str, segments: Vec<TrackSegment>) -> Self {
        Self {
            name: String::from(name),
            segments,
        }
    }

    /// Number of segments on the track.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get a segment by ID.
    pub fn segment(&self, id: usize) -> Result<&TrackSegment, TrackError> {
        self.segments.get(id).ok_or(TrackError::UnknownSegment(id))
    }

    /// Get the ID of the segment following the given one.
    ///
    /// A segment without a link, or with a link to a segment that doesn't exist, is a broken
    /// chain.
    pub fn next_of(&self, id: usize) -> Result<usize, TrackError> {
        match self.segment(id)?.next {
            Some(n) if n < self.segments.len() => Ok(n),
            _ => Err(TrackError::BrokenChain(id)),
        }
    }

    /// Check that the track is non-empty and every segment links to a valid next segment.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.segments.is_empty() {
            return Err(TrackError::Empty);
        }

        for id in 0..self.segments.len() {
            self.next_of(id)?;
        }

        Ok(())
    }

    /// Total length of the track centreline.
    ///
    /// Units: meters
    pub fn length_m(&self) -> f64 {
        self.segments.iter().map(|s| s.length_m()).sum()
    }
}

impl TrackSegment {
    /// Length of the segment along its centreline.
    ///
    /// Units: meters
    pub fn length_m(&self) -> f64 {
        match self.kind {
            SegmentKind::Straight { length_m } => length_m,
            SegmentKind::Turn {
                arc_rad, radius_m, ..
            } => arc_rad * radius_m,
        }
    }

    /// Distance along the centreline from a position to the end of the segment.
    ///
    /// `to_start` is in meters on a straight and in radians on a turn, as reported in
    /// telemetry.
    pub fn dist_to_end_m(&self, to_start: f64) -> f64 {
        match self.kind {
            SegmentKind::Straight { length_m } => length_m - to_start,
            SegmentKind::Turn {
                arc_rad, radius_m, ..
            } => (arc_rad - to_start) * radius_m,
        }
    }

    /// Heading of the track tangent at a position on the segment. The result is not normalised.
    ///
    /// Units: radians
    pub fn tangent_angle_rad(&self, to_start: f64) -> f64 {
        match self.kind {
            SegmentKind::Straight { .. } => self.start_angle_rad,
            SegmentKind::Turn {
                direction: TurnDirection::Left,
                ..
            } => self.start_angle_rad + to_start,
            SegmentKind::Turn {
                direction: TurnDirection::Right,
                ..
            } => self.start_angle_rad - to_start,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

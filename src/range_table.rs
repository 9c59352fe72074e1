//! The ordered, user-edited table of labeled score ranges.
//!
//! Ranges may overlap or leave gaps; the classifier resolves overlaps by
//! stored order. Editing is positional: position in the table is the identity
//! the editor works with, and removing a range shifts every later position
//! down by one. Each range also carries a [`RangeId`] handed out by the table
//! so persisted or concurrent edits can address a range without trusting a
//! position that may have moved.

use crate::errors::RiskError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lower bound given to a freshly added range.
pub const DEFAULT_RANGE_MIN: f64 = 1.0;

/// Upper bound given to a freshly added range.
pub const DEFAULT_RANGE_MAX: f64 = 4.0;

/// Stable identifier of a range within its table.
///
/// Ids are never reused within a table, even after removal. Id 0 marks a
/// range that has not been placed in a table yet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RangeId(u32);

impl RangeId {
    pub const UNASSIGNED: RangeId = RangeId(0);

    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A labeled closed interval `[min, max]` over the score domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRange {
    #[serde(default)]
    id: RangeId,
    pub min: f64,
    pub max: f64,
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RiskRange {
    /// An enabled range with the given bounds and label.
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self {
            id: RangeId::UNASSIGNED,
            min,
            max,
            label: label.into(),
            enabled: true,
        }
    }

    /// The same range, switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn id(&self) -> RangeId {
        self.id
    }

    /// Whether `score` lies in `[min, max]`, regardless of `enabled`.
    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }

    /// Whether this range can resolve `score`: enabled and containing it.
    pub fn matches(&self, score: f64) -> bool {
        self.enabled && self.contains(score)
    }

    /// A range whose bounds are reversed or non-finite can never match.
    pub fn is_empty(&self) -> bool {
        !matches!(
            self.min.partial_cmp(&self.max),
            Some(Ordering::Less | Ordering::Equal)
        )
    }
}

impl Default for RiskRange {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_MIN, DEFAULT_RANGE_MAX, "")
    }
}

/// Ordered collection of risk ranges with positional editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskRangeTable {
    ranges: Vec<RiskRange>,
    #[serde(default)]
    next_id: u32,
}

impl RiskRangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from ranges in order, assigning ids `1..=n`.
    pub fn from_ranges(ranges: impl IntoIterator<Item = RiskRange>) -> Self {
        let ranges: Vec<RiskRange> = ranges
            .into_iter()
            .zip(1..=u32::MAX)
            .map(|(mut range, id)| {
                range.id = RangeId(id);
                range
            })
            .collect();
        let mut table = Self { ranges, next_id: 0 };
        table.next_id = table.max_assigned_id();
        table
    }

    /// Append a blank, enabled range with default bounds `[1, 4]`.
    pub fn add(&mut self) -> Result<RangeId, RiskError> {
        self.push(RiskRange::default())
    }

    /// Append a range, replacing whatever id it carried with a fresh one.
    ///
    /// Fails once the largest id in use is `u32::MAX`, since ids are never
    /// reused.
    pub fn push(&mut self, mut range: RiskRange) -> Result<RangeId, RiskError> {
        let last = self.next_id.max(self.max_assigned_id());
        let next = last
            .checked_add(1)
            .ok_or(RiskError::RangeIdsExhausted { last })?;
        self.next_id = next;
        let id = RangeId(next);
        range.id = id;
        self.ranges.push(range);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn as_slice(&self) -> &[RiskRange] {
        &self.ranges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RiskRange> {
        self.ranges.iter()
    }

    pub fn get(&self, position: usize) -> Option<&RiskRange> {
        self.ranges.get(position)
    }

    pub fn get_by_id(&self, id: RangeId) -> Option<&RiskRange> {
        self.ranges.iter().find(|r| r.id == id)
    }

    /// Current position of the range with `id`, if it is still in the table.
    pub fn position_of(&self, id: RangeId) -> Option<usize> {
        self.ranges.iter().position(|r| r.id == id)
    }

    /// Edit any field of the range at `position` in place.
    ///
    /// The closure cannot change the range's id.
    pub fn edit<F>(&mut self, position: usize, edit: F) -> Result<(), RiskError>
    where
        F: FnOnce(&mut RiskRange),
    {
        let range = self.range_mut(position)?;
        let id = range.id;
        edit(&mut *range);
        range.id = id;
        Ok(())
    }

    pub fn set_min(&mut self, position: usize, min: f64) -> Result<(), RiskError> {
        self.range_mut(position)?.min = min;
        Ok(())
    }

    pub fn set_max(&mut self, position: usize, max: f64) -> Result<(), RiskError> {
        self.range_mut(position)?.max = max;
        Ok(())
    }

    pub fn set_label(
        &mut self,
        position: usize,
        label: impl Into<String>,
    ) -> Result<(), RiskError> {
        self.range_mut(position)?.label = label.into();
        Ok(())
    }

    pub fn set_enabled(&mut self, position: usize, enabled: bool) -> Result<(), RiskError> {
        self.range_mut(position)?.enabled = enabled;
        Ok(())
    }

    /// Flip `enabled` at `position`, returning the new state.
    pub fn toggle(&mut self, position: usize) -> Result<bool, RiskError> {
        let range = self.range_mut(position)?;
        range.enabled = !range.enabled;
        Ok(range.enabled)
    }

    /// Remove the range at `position`; later ranges shift down by one.
    pub fn remove(&mut self, position: usize) -> Result<RiskRange, RiskError> {
        self.check_position(position)?;
        Ok(self.ranges.remove(position))
    }

    pub fn remove_by_id(&mut self, id: RangeId) -> Option<RiskRange> {
        let position = self.position_of(id)?;
        Some(self.ranges.remove(position))
    }

    fn range_mut(&mut self, position: usize) -> Result<&mut RiskRange, RiskError> {
        self.check_position(position)?;
        Ok(&mut self.ranges[position])
    }

    fn check_position(&self, position: usize) -> Result<(), RiskError> {
        if position < self.ranges.len() {
            Ok(())
        } else {
            Err(RiskError::RangeIndex {
                position,
                len: self.ranges.len(),
            })
        }
    }

    // Tables deserialized without `next_id` must not hand out an id already in use.
    fn max_assigned_id(&self) -> u32 {
        self.ranges.iter().map(|r| r.id.0).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a RiskRangeTable {
    type Item = &'a RiskRange;
    type IntoIter = std::slice::Iter<'a, RiskRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl FromIterator<RiskRange> for RiskRangeTable {
    fn from_iter<I: IntoIterator<Item = RiskRange>>(iter: I) -> Self {
        Self::from_ranges(iter)
    }
}

//! Synthetic assignment rows.
//!
//! The backend cannot create assignments yet, so the roster is padded with
//! generated rows. Everything that produces them lives here, behind
//! [`PlaceholderSource`]; the reconciler only ever sees that trait.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;
use tracing::warn;

use crate::config::{CountRange, Placeholders, MAX_AGE_MS_CEILING, MAX_PLACEHOLDER_COUNT};
use crate::model::RosterRow;

/// First identity of a full-roster placeholder.
pub const ROSTER_ID_OFFSET: i64 = 1000;
/// Full-roster placeholders point at fake course ids starting here.
pub const ROSTER_COURSE_ID_OFFSET: i64 = 999;
pub const PLACEHOLDER_DESCRIPTION: &str = "This is a fake assignment";

pub type Clock = fn() -> DateTime<Utc>;

/// Supplies the rows appended after the real assignments.
pub trait PlaceholderSource: Send {
    fn placeholders(&mut self) -> Vec<RosterRow>;
}

/// Source that contributes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlaceholders;

impl PlaceholderSource for NoPlaceholders {
    fn placeholders(&mut self) -> Vec<RosterRow> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlaceholderSynthesizer {
    range: CountRange,
    max_age_ms: i64,
}

impl PlaceholderSynthesizer {
    pub fn new(range: CountRange, max_age_ms: i64) -> Self {
        Self { range, max_age_ms }
    }

    pub fn roster(policy: &Placeholders) -> Self {
        Self::new(policy.roster, policy.max_age_ms)
    }

    pub fn course(policy: &Placeholders) -> Self {
        Self::new(policy.course, policy.max_age_ms)
    }

    /// Draw a row count from the range. An inverted range collapses to its
    /// minimum, negative results clamp to zero and both ends are capped at
    /// [`MAX_PLACEHOLDER_COUNT`].
    pub fn count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let lo = self.range.min.min(MAX_PLACEHOLDER_COUNT);
        let hi = self.range.max.max(lo).min(MAX_PLACEHOLDER_COUNT);
        let n = if lo == hi { lo } else { rng.random_range(lo..=hi) };
        n.max(0) as usize
    }

    fn created_at<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> DateTime<Utc> {
        let span = self.max_age_ms.clamp(0, MAX_AGE_MS_CEILING) as f64;
        let offset = (rng.random::<f64>() * span) as i64;
        now.checked_sub_signed(Duration::milliseconds(offset)).unwrap_or(now)
    }

    /// Rows padding the full roster: ids `1000 + i`, full ISO-8601 stamps.
    pub fn roster_rows<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> Vec<RosterRow> {
        let n = self.count(rng);
        let updated_at = iso_millis(now);
        (0..n as i64)
            .map(|idx| RosterRow {
                id: ROSTER_ID_OFFSET + idx,
                name: format!("Fake Assignment {}", idx + 1),
                description: PLACEHOLDER_DESCRIPTION.to_string(),
                course_id: ROSTER_COURSE_ID_OFFSET + idx,
                created_at: iso_millis(self.created_at(rng, now)),
                updated_at: updated_at.clone(),
                course_name: format!("Fake Course {}", idx + 1),
            })
            .collect()
    }

    /// Rows for a single course: ids are the course id with the zero-based
    /// index appended as digits, stamps are truncated to the minute.
    pub fn course_rows<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        now: DateTime<Utc>,
        course_id: i64,
        course_name: &str,
    ) -> Vec<RosterRow> {
        let n = self.count(rng);
        let updated_at = minute_precision(now);
        let mut rows = Vec::with_capacity(n);
        for idx in 0..n {
            let created_at = minute_precision(self.created_at(rng, now));
            rows.push(RosterRow {
                id: course_scoped_id(course_id, idx),
                name: format!("Assignment {} for {}", idx + 1, course_name),
                description: PLACEHOLDER_DESCRIPTION.to_string(),
                course_id,
                created_at,
                updated_at: updated_at.clone(),
                course_name: course_name.to_string(),
            });
        }
        rows
    }
}

/// `"{course_id}{idx}"` read back as an integer. Saturates at the `i64`
/// bounds when the concatenation does not fit.
pub fn course_scoped_id(course_id: i64, idx: usize) -> i64 {
    match format!("{}{}", course_id, idx).parse() {
        Ok(id) => id,
        Err(_) => {
            warn!(course_id, idx, "placeholder id does not fit in i64; saturating");
            if course_id < 0 {
                i64::MIN
            } else {
                i64::MAX
            }
        }
    }
}

pub fn iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn minute_precision(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Full-roster placeholder source with its own random generator and clock.
pub struct RosterPlaceholders<R> {
    synth: PlaceholderSynthesizer,
    rng: R,
    clock: Clock,
}

impl<R: Rng + Send> RosterPlaceholders<R> {
    pub fn new(synth: PlaceholderSynthesizer, rng: R, clock: Clock) -> Self {
        Self { synth, rng, clock }
    }
}

impl<R: Rng + Send> PlaceholderSource for RosterPlaceholders<R> {
    fn placeholders(&mut self) -> Vec<RosterRow> {
        let now = (self.clock)();
        self.synth.roster_rows(&mut self.rng, now)
    }
}

//! Fixed-point frecency.
//!
//! Scores are held in thousandths of a point so sums are exact integer additions, which keeps
//! [`crate::TemporalInfo::merge`] associative and commutative for any weights.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MILLIS_PER_POINT: f64 = 1_000.0;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Score(u64);
impl Score {
	pub const ZERO: Self = Self(0);

	/// Rounds `points` to the nearest thousandth. Negative and NaN inputs become zero, values past
	/// the representable range saturate.
	pub fn from_points(points: f64) -> Self {
		if points.is_nan() || points <= 0.0 {
			return Self::ZERO;
		}

		// Float-to-int `as` casts saturate.
		Self((points * MILLIS_PER_POINT).round() as u64)
	}

	pub const fn from_millis(millis: u64) -> Self {
		Self(millis)
	}

	pub const fn millis(self) -> u64 {
		self.0
	}

	pub fn points(self) -> f64 {
		self.0 as f64 / MILLIS_PER_POINT
	}

	pub const fn saturating_add(self, other: Self) -> Self {
		Self(self.0.saturating_add(other.0))
	}
}

impl Serialize for Score {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_f64(self.points())
	}
}

impl<'de> Deserialize<'de> for Score {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		f64::deserialize(deserializer).map(Self::from_points)
	}
}

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub service: Service,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub grouping: Grouping,
	#[serde(default)]
	pub display: Display,
	#[serde(default)]
	pub scopes: Scopes,
	#[serde(default)]
	pub frecency: Frecency,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Service {
	pub log_level: String,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: "info".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Frecency a record must reach before it can outrank another one on usage alone.
	pub threshold_frecency: f64,
	/// Schedules and deadlines at or past midnight this many days ahead count as snoozed.
	/// Zero disables the horizon.
	pub snooze_horizon_days: Option<u32>,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { threshold_frecency: 50.0, snooze_horizon_days: Some(3) }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Grouping {
	/// One of `directory`, `remote`, or `none`.
	pub dimension: String,
	/// One of `frecency` or `none`.
	pub sort: String,
}
impl Default for Grouping {
	fn default() -> Self {
		Self { dimension: "directory".to_string(), sort: "frecency".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Display {
	/// Display-only; never feeds into ranking.
	pub dim_blocked: bool,
	pub label_width: u32,
}
impl Default for Display {
	fn default() -> Self {
		Self { dim_blocked: true, label_width: 80 }
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Scopes {
	/// Project roots written as `/`-separated outline paths.
	pub roots: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Frecency {
	pub buckets: Vec<FrecencyBucket>,
}
impl Default for Frecency {
	fn default() -> Self {
		Self {
			buckets: vec![
				FrecencyBucket { max_age_days: 4, weight: 100.0 },
				FrecencyBucket { max_age_days: 14, weight: 70.0 },
				FrecencyBucket { max_age_days: 31, weight: 50.0 },
				FrecencyBucket { max_age_days: 90, weight: 30.0 },
				FrecencyBucket { max_age_days: 365, weight: 10.0 },
			],
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FrecencyBucket {
	pub max_age_days: u32,
	pub weight: f64,
}

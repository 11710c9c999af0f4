mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Display, Frecency, FrecencyBucket, Grouping, Ranking, Scopes, Service};

use std::{fs, path::Path};

/// One hundred years.
pub const MAX_SNOOZE_HORIZON_DAYS: u32 = 36_500;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if !cfg.ranking.threshold_frecency.is_finite() {
		return Err(Error::Validation {
			message: "ranking.threshold_frecency must be a finite number.".to_string(),
		});
	}
	if cfg.ranking.threshold_frecency < 0.0 {
		return Err(Error::Validation {
			message: "ranking.threshold_frecency must be zero or greater.".to_string(),
		});
	}
	if cfg.ranking.snooze_horizon_days.is_some_and(|days| days > MAX_SNOOZE_HORIZON_DAYS) {
		return Err(Error::Validation {
			message: format!("ranking.snooze_horizon_days must be at most {MAX_SNOOZE_HORIZON_DAYS}."),
		});
	}
	if !matches!(cfg.grouping.dimension.as_str(), "directory" | "remote" | "none") {
		return Err(Error::Validation {
			message: "grouping.dimension must be one of directory, remote, or none.".to_string(),
		});
	}
	if !matches!(cfg.grouping.sort.as_str(), "frecency" | "none") {
		return Err(Error::Validation {
			message: "grouping.sort must be one of frecency or none.".to_string(),
		});
	}
	if cfg.display.label_width == 0 {
		return Err(Error::Validation {
			message: "display.label_width must be greater than zero.".to_string(),
		});
	}
	if cfg.frecency.buckets.is_empty() {
		return Err(Error::Validation {
			message: "frecency.buckets must be non-empty.".to_string(),
		});
	}

	let mut previous_age = None;

	for bucket in &cfg.frecency.buckets {
		if !bucket.weight.is_finite() {
			return Err(Error::Validation {
				message: "frecency.buckets.weight must be a finite number.".to_string(),
			});
		}
		if bucket.weight < 0.0 {
			return Err(Error::Validation {
				message: "frecency.buckets.weight must be zero or greater.".to_string(),
			});
		}

		if let Some(previous) = previous_age
			&& bucket.max_age_days <= previous
		{
			return Err(Error::Validation {
				message: "frecency.buckets.max_age_days must be strictly increasing.".to_string(),
			});
		}

		previous_age = Some(bucket.max_age_days);
	}

	for root in &cfg.scopes.roots {
		if root.split('/').any(|segment| segment.trim().is_empty()) {
			return Err(Error::Validation {
				message: format!("scopes.roots entry {root:?} must not contain empty segments."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if cfg.ranking.snooze_horizon_days == Some(0) {
		cfg.ranking.snooze_horizon_days = None;
	}

	cfg.scopes.roots.retain(|root| !root.trim().is_empty());

	for root in &mut cfg.scopes.roots {
		*root = root.trim().trim_matches('/').to_string();
	}
}

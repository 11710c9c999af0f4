use outrank_config::Config;
use outrank_domain::RootPath;

use crate::{Error, GroupSort, GroupingDimension, RankingPolicy, Result, TemporalScorer};

pub fn resolve_ranking_policy<L, S>(cfg: &Config, scorer: &S) -> RankingPolicy
where
	S: TemporalScorer<L> + ?Sized,
{
	RankingPolicy {
		threshold_frecency: cfg.ranking.threshold_frecency,
		// Zero disables the horizon, as does a date past the calendar.
		snooze_cutoff: cfg
			.ranking
			.snooze_horizon_days
			.filter(|days| *days > 0)
			.and_then(|days| scorer.midnight_in_days(days)),
	}
}

pub fn resolve_grouping_dimension(cfg: &Config) -> Result<GroupingDimension> {
	match cfg.grouping.dimension.as_str() {
		"directory" => Ok(GroupingDimension::Directory),
		"remote" => Ok(GroupingDimension::Remote),
		"none" => Ok(GroupingDimension::None),
		_ => Err(Error::InvalidRequest {
			message: "grouping.dimension must be one of directory, remote, or none.".to_string(),
		}),
	}
}

pub fn resolve_group_sort(cfg: &Config) -> Result<GroupSort> {
	match cfg.grouping.sort.as_str() {
		"frecency" => Ok(GroupSort::Frecency),
		"none" => Ok(GroupSort::None),
		_ => Err(Error::InvalidRequest {
			message: "grouping.sort must be one of frecency or none.".to_string(),
		}),
	}
}

pub fn resolve_roots(cfg: &Config) -> Vec<RootPath> {
	cfg.scopes.roots.iter().map(|root| RootPath::parse(root)).collect()
}

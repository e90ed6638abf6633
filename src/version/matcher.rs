//! Latest matching version selection against a Maven range

use tracing::debug;

use crate::config::MatcherConfig;
use crate::version::error::RangeError;
use crate::version::range::RangeSet;
use crate::version::semver::Version;

/// Selects the greatest candidate satisfying a [`RangeSet`]
///
/// Qualifier-bearing candidates are excluded unless the matcher is built
/// with `include_prereleases`.
#[derive(Debug, Clone, Default)]
pub struct VersionMatcher {
    include_prereleases: bool,
}

impl VersionMatcher {
    pub fn new(config: &MatcherConfig) -> Self {
        Self {
            include_prereleases: config.include_prereleases,
        }
    }

    /// Whether `version` takes part in selection at all
    pub fn admits(&self, version: &Version) -> bool {
        self.include_prereleases || !version.is_prerelease()
    }

    /// Whether `version` takes part in selection and satisfies `range`
    pub fn matches(&self, version: &Version, range: &RangeSet) -> bool {
        self.admits(version) && range.contains(version)
    }

    /// Select the greatest candidate satisfying `range`.
    ///
    /// Returns `None` when no candidate matches.
    pub fn select_latest<'a, I>(&self, candidates: I, range: &RangeSet) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        let latest = candidates
            .into_iter()
            .filter(|candidate| self.matches(candidate, range))
            .max();
        debug!("Selected {:?} for range '{}'", latest.map(ToString::to_string), range);
        latest
    }

    /// Parse `range_expr` and select the greatest candidate satisfying it.
    pub fn select_latest_in<'a, I>(
        &self,
        candidates: I,
        range_expr: &str,
    ) -> Result<Option<&'a Version>, RangeError>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        let range = RangeSet::parse(range_expr)?;
        Ok(self.select_latest(candidates, &range))
    }
}

/// Select the latest non-pre-release candidate satisfying a Maven range expression.
///
/// Examples:
/// - {1.0.0, 1.2.0, 2.0.0} in "[1.0.0,2.0.0)" -> 1.2.0
/// - {1.0.0-beta} in "[1.0.0,2.0.0)" -> None
pub fn select_latest<'a, I>(candidates: I, range_expr: &str) -> Result<Option<Version>, RangeError>
where
    I: IntoIterator<Item = &'a Version>,
{
    VersionMatcher::default()
        .select_latest_in(candidates, range_expr)
        .map(|latest| latest.cloned())
}

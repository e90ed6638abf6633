//! Dependency resolution against a source of published versions
//!
//! The resolver applies the two caller policies for failures:
//! - listing a package's versions skips unparsable entries (unless configured otherwise)
//! - resolving a declared specifier fails the single request on conversion or range errors

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::config::{BridgeConfig, ListingConfig};
use crate::version::converter;
use crate::version::error::{ResolveError, SourceError};
use crate::version::matcher::VersionMatcher;
use crate::version::range::RangeSet;
use crate::version::semver::Version;

/// Trait for supplying the raw versions published for a package
#[cfg_attr(test, automock)]
pub trait VersionSource: Send + Sync {
    /// Fetches all published version strings for a package
    ///
    /// # Arguments
    /// * `package_name` - The already-resolved package identifier
    fn published_versions(&self, package_name: &str) -> Result<Vec<String>, SourceError>;
}

/// Resolves declared npm specifiers to concrete published versions
pub struct DependencyResolver<S: VersionSource> {
    source: S,
    matcher: VersionMatcher,
    listing: ListingConfig,
}

impl<S: VersionSource> DependencyResolver<S> {
    pub fn new(source: S, config: &BridgeConfig) -> Self {
        Self {
            source,
            matcher: VersionMatcher::new(&config.matcher),
            listing: config.listing.clone(),
        }
    }

    /// List the parsed versions of a package in ascending order
    pub fn list_versions(&self, package_name: &str) -> Result<Vec<Version>, ResolveError> {
        let raw = self.source.published_versions(package_name)?;

        let mut versions = Vec::with_capacity(raw.len());
        for value in &raw {
            match Version::parse(value) {
                Ok(version) => versions.push(version),
                Err(e) if self.listing.skip_invalid => {
                    warn!("Skipping version '{}' of {}: {}", value, package_name, e);
                }
                Err(source) => {
                    return Err(ResolveError::InvalidListing {
                        package: package_name.to_string(),
                        source,
                    });
                }
            }
        }

        versions.sort();
        Ok(versions)
    }

    /// List the versions of a package that take part in latest selection
    pub fn list_release_versions(&self, package_name: &str) -> Result<Vec<Version>, ResolveError> {
        let versions = self.list_versions(package_name)?;
        Ok(versions
            .into_iter()
            .filter(|version| self.matcher.admits(version))
            .collect())
    }

    /// Resolve a declared npm specifier to the latest satisfying published version
    pub fn resolve(
        &self,
        package_name: &str,
        specifier: &str,
    ) -> Result<Option<Version>, ResolveError> {
        let range = converter::convert(specifier)?;
        self.resolve_range(package_name, &range)
    }

    /// Resolve a Maven range expression to the latest satisfying published version
    pub fn resolve_maven(
        &self,
        package_name: &str,
        range_expr: &str,
    ) -> Result<Option<Version>, ResolveError> {
        let range = RangeSet::parse(range_expr)?;
        self.resolve_range(package_name, &range)
    }

    fn resolve_range(
        &self,
        package_name: &str,
        range: &RangeSet,
    ) -> Result<Option<Version>, ResolveError> {
        let versions = self.list_versions(package_name)?;
        let latest = self.matcher.select_latest(&versions, range).cloned();

        match &latest {
            Some(version) => debug!("Resolved {}@{} to {}", package_name, range, version),
            None => debug!("No version of {} satisfies {}", package_name, range),
        }
        Ok(latest)
    }
}

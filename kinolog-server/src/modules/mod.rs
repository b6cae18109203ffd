//! Reusable feature modules and the per-site module registry.
//!
//! A module is a bundle of route fragments; a site's route table is nothing
//! but its module list concatenated in order. Composition happens once at
//! startup, never per request.

use std::fmt;

use axum::routing::MethodRouter;

use crate::infra::app_state::AppState;
use crate::sites::SiteId;

pub mod legal;
pub mod meta;
pub mod movies;
pub mod secrets;
pub mod tv;

/// One mountable route: a static path plus its handler set.
pub struct RouteFragment {
    pub path: &'static str,
    pub handler: MethodRouter<AppState>,
}

impl RouteFragment {
    pub fn new(path: &'static str, handler: MethodRouter<AppState>) -> Self {
        RouteFragment { path, handler }
    }
}

impl fmt::Debug for RouteFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteFragment")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// The pool of composable feature bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureModule {
    Movies,
    Tv,
    Secrets,
    Legal,
    Meta,
}

impl FeatureModule {
    /// Mounted on every site, appended after the site's own modules so a
    /// site-specific fragment shadows a shared one under first-match-wins.
    pub const SHARED: [FeatureModule; 2] = [FeatureModule::Legal, FeatureModule::Meta];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureModule::Movies => "movies",
            FeatureModule::Tv => "tv",
            FeatureModule::Secrets => "secrets",
            FeatureModule::Legal => "legal",
            FeatureModule::Meta => "meta",
        }
    }

    /// Route fragments in mount order.
    pub fn routes(&self) -> Vec<RouteFragment> {
        match self {
            FeatureModule::Movies => movies::routes(),
            FeatureModule::Tv => tv::routes(),
            FeatureModule::Secrets => secrets::routes(),
            FeatureModule::Legal => legal::routes(),
            FeatureModule::Meta => meta::routes(),
        }
    }
}

/// Ordered module list for a site, shared modules included.
pub fn site_modules(site: SiteId) -> Vec<FeatureModule> {
    let own: &[FeatureModule] = match site {
        SiteId::Movies => &[FeatureModule::Movies],
        SiteId::Tv => &[FeatureModule::Tv],
        SiteId::Secrets => &[FeatureModule::Secrets],
    };
    own.iter().chain(FeatureModule::SHARED.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_site_gets_the_shared_modules_appended() {
        for site in SiteId::ALL {
            let modules = site_modules(site);
            assert_eq!(
                &modules[modules.len() - FeatureModule::SHARED.len()..],
                &FeatureModule::SHARED,
                "{site:?}"
            );
        }
    }

    #[test]
    fn site_specific_modules_come_first() {
        assert_eq!(site_modules(SiteId::Tv)[0], FeatureModule::Tv);
        assert_eq!(site_modules(SiteId::Secrets)[0], FeatureModule::Secrets);
    }
}

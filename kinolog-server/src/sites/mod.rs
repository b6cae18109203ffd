//! The closed set of logical sites one kinolog process serves, and the total
//! host-to-site resolution rule.

use serde::Serialize;

/// Logical tenant, selected per request by the inbound host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteId {
    /// The film archive; also the fallback for every unmatched host.
    Movies,
    /// TV recording archive, served under a `tv.` host.
    Tv,
    /// One-time-secrets frontend, served under an `ots.` host.
    #[serde(rename = "ots")]
    Secrets,
}

impl SiteId {
    pub const ALL: [SiteId; 3] = [SiteId::Movies, SiteId::Tv, SiteId::Secrets];

    pub fn slug(&self) -> &'static str {
        match self {
            SiteId::Movies => "movies",
            SiteId::Tv => "tv",
            SiteId::Secrets => "ots",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SiteId::Movies => "Filmarchiv",
            SiteId::Tv => "TV-Archiv",
            SiteId::Secrets => "One-Time Secrets",
        }
    }
}

/// Map an inbound host to its site. Total by construction: any host that
/// matches no prefix (including garbage and the empty string) serves the
/// film archive.
pub fn resolve_site(host: &str) -> SiteId {
    let host = host.trim().to_ascii_lowercase();
    let bare = match host.split_once(':') {
        Some((name, _port)) => name,
        None => host.as_str(),
    };

    if bare.starts_with("tv.") {
        SiteId::Tv
    } else if bare.starts_with("ots.") {
        SiteId::Secrets
    } else {
        SiteId::Movies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_select_sites() {
        assert_eq!(resolve_site("tv.archive.example"), SiteId::Tv);
        assert_eq!(resolve_site("ots.archive.example"), SiteId::Secrets);
        assert_eq!(resolve_site("archive.example"), SiteId::Movies);
        assert_eq!(resolve_site("www.archive.example"), SiteId::Movies);
    }

    #[test]
    fn ports_and_case_do_not_matter() {
        assert_eq!(resolve_site("TV.Archive.Example:8420"), SiteId::Tv);
        assert_eq!(resolve_site("ots.local:3000"), SiteId::Secrets);
    }

    #[test]
    fn resolution_is_total_over_garbage() {
        for host in ["", "   ", "localhost", "127.0.0.1:80", "::1", "tv", "ots",
            "not a host at all", "tv.x", "…"]
        {
            let site = resolve_site(host);
            assert!(SiteId::ALL.contains(&site), "{host:?} -> {site:?}");
        }
    }

    #[test]
    fn bare_prefix_without_dot_falls_through() {
        assert_eq!(resolve_site("tv"), SiteId::Movies);
        assert_eq!(resolve_site("otsarchive.example"), SiteId::Movies);
    }
}

//! Known documentation sites and their aliases.

use crate::error::{Result, RtfmError};
use crate::inventory::as_directory;
use crate::search::{Suggestion, suggest_similar};
use std::collections::BTreeMap;
use url::Url;

/// Sites available when no configuration overrides them.
pub const DEFAULT_SITES: [(&str, &str); 5] = [
    ("dpy", "https://discordpy.readthedocs.io/en/latest/"),
    ("discord.py", "https://discordpy.readthedocs.io/en/latest/"),
    ("lightbulb", "https://tandemdude.gitlab.io/lightbulb/"),
    ("zenora", "https://zenora-py.github.io"),
    ("asyncio", "https://asyncio.readthedocs.io/en/latest/"),
];

/// Read-only mapping of site aliases to base documentation URLs.
///
/// Several aliases may point at the same site. Base URLs are stored in
/// directory form (with a trailing `/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRegistry {
    sites: BTreeMap<String, Url>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        let sites = DEFAULT_SITES
            .iter()
            .filter_map(|(alias, base)| {
                Url::parse(base)
                    .ok()
                    .map(|url| ((*alias).to_string(), as_directory(url)))
            })
            .collect();
        Self { sites }
    }
}

impl SiteRegistry {
    /// Build a registry from `(alias, base_url)` pairs.
    ///
    /// Fails if any base URL is not an absolute http(s) URL.
    pub fn from_pairs<I, A, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut sites = BTreeMap::new();
        for (alias, base) in pairs {
            let alias = alias.as_ref().trim();
            let base = base.as_ref().trim();
            if alias.is_empty() {
                return Err(RtfmError::InvalidUrl(format!(
                    "empty alias for base URL '{}'",
                    base
                )));
            }

            let url = Url::parse(base)
                .map_err(|e| RtfmError::InvalidUrl(format!("{} ('{}' for {})", e, base, alias)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(RtfmError::InvalidUrl(format!(
                    "'{}' for {} is not an http(s) URL",
                    base, alias
                )));
            }

            sites.insert(alias.to_string(), as_directory(url));
        }
        Ok(Self { sites })
    }

    /// Look up the base URL for an alias.
    pub fn resolve(&self, alias: &str) -> Result<&Url> {
        self.sites
            .get(alias)
            .ok_or_else(|| RtfmError::UnknownSite(alias.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Aliases in sorted order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// `(alias, base_url)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Url)> {
        self.sites.iter().map(|(alias, url)| (alias.as_str(), url))
    }

    /// Aliases grouped by the site they point at, in base URL order.
    pub fn grouped(&self) -> BTreeMap<&Url, Vec<&str>> {
        let mut groups: BTreeMap<&Url, Vec<&str>> = BTreeMap::new();
        for (alias, url) in &self.sites {
            groups.entry(url).or_default().push(alias);
        }
        groups
    }

    /// Known aliases that look like a misspelling of `alias`.
    pub fn suggestions(&self, alias: &str) -> Vec<Suggestion> {
        suggest_similar(alias, self.aliases())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn default_registry_shares_base_urls() {
        let registry = SiteRegistry::default();
        check!(registry.len() == DEFAULT_SITES.len());
        check!(registry.resolve("dpy").unwrap() == registry.resolve("discord.py").unwrap());
        check!(registry.resolve("zenora").unwrap().as_str() == "https://zenora-py.github.io/");
    }

    #[test]
    fn unknown_alias_is_reported() {
        let registry = SiteRegistry::default();
        let_assert!(Err(RtfmError::UnknownSite(alias)) = registry.resolve("nope"));
        check!(alias == "nope");
    }

    #[test]
    fn base_urls_become_directories() {
        let registry = SiteRegistry::from_pairs([("dpy", "https://example.org/docs")]).unwrap();
        check!(registry.resolve("dpy").unwrap().as_str() == "https://example.org/docs/");
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        check!(SiteRegistry::from_pairs([("a", "docs/latest")]).is_err());
        check!(SiteRegistry::from_pairs([("a", "ftp://example.org/docs")]).is_err());
        check!(SiteRegistry::from_pairs([("", "https://example.org")]).is_err());
    }

    #[test]
    fn groups_aliases_by_site() {
        let registry = SiteRegistry::default();
        let groups = registry.grouped();
        check!(groups.len() == 4);
        let dpy = registry.resolve("dpy").unwrap();
        check!(groups[dpy] == vec!["discord.py", "dpy"]);
    }

    #[test]
    fn suggests_misspelled_aliases() {
        let registry = SiteRegistry::default();
        let names: Vec<_> = registry
            .suggestions("asyncoi")
            .into_iter()
            .map(|s| s.name)
            .collect();
        check!(names.first().map(String::as_str) == Some("asyncio"));
    }
}

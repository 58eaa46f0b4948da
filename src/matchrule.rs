//! URL-matching rules, ported from
//! `examples/original_source/python/urlcanon/rules.py`.
//!
//! A [`MatchRule`] ANDs together whichever conditions are set. None of the
//! conditions normalize or canonicalize anything; callers are expected to
//! canonicalize `url`/`parent_url` themselves before calling
//! [`MatchRule::applies`].

use regex::bytes::Regex;

use crate::error::MatchRuleConstructionError;
use crate::idna_host;
use crate::ipaddr;
use crate::keys;
use crate::parsed_url::ParsedUrl;
use crate::steps;

/// Compile `pattern` anchored to match the entire haystack, emulating
/// Python's `re.match(pattern + br'\Z')` (no partial/unanchored matches).
fn full_match_regex(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{pattern})\z"))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// True if `domain` is the same IP address as `host`, the same domain, or
/// `host` is a subdomain of `domain`. Does no normalization of either side.
pub fn host_matches_domain(host: &[u8], domain: &[u8]) -> bool {
    if host == domain {
        return true;
    }
    let host_is_ip = ipaddr::parse_ipv4_or_6(host) != (None, None);
    let domain_is_ip = ipaddr::parse_ipv4_or_6(domain) != (None, None);
    if host_is_ip || domain_is_ip {
        return false;
    }
    keys::reverse_host(host, true).starts_with(&keys::reverse_host(domain, true))
}

/// As [`host_matches_domain`], but takes a whole URL and checks its host.
pub fn url_matches_domain(url: &ParsedUrl, domain: &[u8]) -> bool {
    host_matches_domain(&url.host, domain)
}

/// Normalize a bare host for comparison with [`host_matches_domain`]: strip
/// and collapse stray dots, then (unless it's an IP literal) lowercase and
/// IDNA-encode it. Useful when a caller has a host string from outside any
/// `ParsedUrl` (e.g. a DNS lookup) that they want to compare against a
/// rule's `domain`.
pub fn normalize_host(host: &[u8]) -> Vec<u8> {
    let collapsed = steps::collapse_host_dots(host);
    if ipaddr::parse_ipv4_or_6(&collapsed) != (None, None) || collapsed.first() == Some(&b'[') {
        return collapsed;
    }
    let lowered = String::from_utf8_lossy(&collapsed).to_lowercase();
    idna_host::to_ascii(&lowered).into_bytes()
}

/// A url-matching rule with one or more conditions; all set conditions must
/// match for [`MatchRule::applies`] to return true.
#[derive(Debug, Clone, Default)]
pub struct MatchRule {
    surt: Option<Vec<u8>>,
    ssurt: Option<Vec<u8>>,
    domain: Option<Vec<u8>>,
    substring: Option<Vec<u8>>,
    regex: Option<Regex>,
    parent_url_regex: Option<Regex>,
}

impl MatchRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surt(mut self, surt: impl Into<Vec<u8>>) -> Self {
        self.surt = Some(surt.into());
        self
    }

    pub fn with_ssurt(mut self, ssurt: impl Into<Vec<u8>>) -> Self {
        self.ssurt = Some(ssurt.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<Vec<u8>>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_substring(mut self, substring: impl Into<Vec<u8>>) -> Self {
        self.substring = Some(substring.into());
        self
    }

    pub fn with_regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.regex = Some(full_match_regex(pattern)?);
        Ok(self)
    }

    pub fn with_parent_url_regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.parent_url_regex = Some(full_match_regex(pattern)?);
        Ok(self)
    }

    /// Build a rule from the deprecated `url_match`/`value` pair
    /// (`REGEX_MATCH`, `SURT_MATCH`, or `STRING_MATCH`). Any other
    /// `url_match` value is rejected.
    pub fn from_legacy(
        url_match: &str,
        value: impl Into<Vec<u8>>,
    ) -> Result<Self, MatchRuleConstructionError> {
        let value = value.into();
        match url_match {
            "REGEX_MATCH" => {
                let pattern = String::from_utf8_lossy(&value).into_owned();
                full_match_regex(&pattern)
                    .map(|regex| Self { regex: Some(regex), ..Self::default() })
                    .map_err(|_| MatchRuleConstructionError::new(url_match))
            }
            "SURT_MATCH" => Ok(Self::new().with_surt(value)),
            "STRING_MATCH" => Ok(Self::new().with_substring(value)),
            other => Err(MatchRuleConstructionError::new(other)),
        }
    }

    /// True if every condition set on this rule matches `url` (and
    /// `parent_url`, for rules with a `parent_url_regex`).
    pub fn applies(&self, url: &ParsedUrl, parent_url: Option<&ParsedUrl>) -> bool {
        if let Some(domain) = &self.domain {
            if !url_matches_domain(url, domain) {
                return false;
            }
        }
        if let Some(surt) = &self.surt {
            if !keys::surt(url, true, true).starts_with(surt.as_slice()) {
                return false;
            }
        }
        if let Some(ssurt) = &self.ssurt {
            if !keys::ssurt(url).starts_with(ssurt.as_slice()) {
                return false;
            }
        }
        if let Some(substring) = &self.substring {
            if !contains(&url.bytes(), substring) {
                return false;
            }
        }
        if let Some(regex) = &self.regex {
            if !regex.is_match(&url.bytes()) {
                return false;
            }
        }
        if let Some(regex) = &self.parent_url_regex {
            match parent_url {
                Some(parent) if regex.is_match(&parent.bytes()) => {}
                _ => return false,
            }
        }
        true
    }
}

//! URL parsing and canonicalization for web-archiving and crawl pipelines.
//!
//! This crate parses URLs into a lossless byte-level record
//! ([`ParsedUrl`]), runs named canonicalization pipelines over that record
//! ([`Canonicalizer`] and the [`WHATWG`], [`GOOGLE`], [`SEMANTIC_PRECISE`],
//! [`SEMANTIC`], and [`AGGRESSIVE`] instances), derives sort-friendly keys
//! for archive indexes ([`surt`], [`ssurt`], [`surt_ancestry`]), and
//! evaluates url-matching rules ([`MatchRule`]).
//!
//! Parsing never fails. Malformed input still produces a best-effort
//! [`ParsedUrl`], with whatever could not be parsed left in its `path`
//! field. The only fallible operation in this crate is building a
//! [`MatchRule`] from a legacy `url_match`/`value` pair.

mod error;
mod idna_host;
mod ipaddr;
mod keys;
mod matchrule;
mod parsed_url;
mod pathdots;
mod percent;
mod pipeline;
mod schemes;
mod steps;

pub use error::MatchRuleConstructionError;
pub use keys::{reverse_host, ssurt, surt, surt_ancestry};
pub use matchrule::{host_matches_domain, normalize_host, url_matches_domain, MatchRule};
pub use parsed_url::{parse_url, ParsedUrl};
pub use pipeline::{Canonicalizer, AGGRESSIVE, GOOGLE, SEMANTIC, SEMANTIC_PRECISE, WHATWG};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_crate_canonicalizes_end_to_end() {
        let mut url = parse_url(b"HTTP://www.Example.com:80/../a/./b?z=1&a=2#f");
        WHATWG.canonicalize(&mut url);
        assert_eq!(url.to_string_lossy(), "http://www.example.com/a/b?z=1&a=2#f");
    }

    #[test]
    fn match_rule_applies_to_canonicalized_url() {
        let mut url = parse_url(b"HTTP://www.Example.com/foo");
        WHATWG.canonicalize(&mut url);
        let rule = MatchRule::new().with_domain(b"example.com".to_vec());
        assert!(rule.applies(&url, None));
    }

    #[test]
    fn surt_and_ssurt_are_public() {
        let url = parse_url(b"http://example.com/foo");
        assert!(surt(&url, true, true).starts_with(b"http://(com,example,)"));
        assert!(ssurt(&url).starts_with(b"com,example,"));
    }
}

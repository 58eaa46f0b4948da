//! Black-box tests of `MatchRule` against canonicalized URLs, modeled on
//! the YAML scope-rule examples in the original rule engine's doc comments.

use urlcanon::{host_matches_domain, normalize_host, parse_url, MatchRule, AGGRESSIVE};

fn canonical(s: &str) -> urlcanon::ParsedUrl {
    let mut u = parse_url(s.as_bytes());
    AGGRESSIVE.canonicalize(&mut u);
    u
}

#[test]
fn domain_rule_matches_subdomains() {
    let rule = MatchRule::new().with_domain(b"monkey.org".to_vec());
    assert!(rule.applies(&canonical("http://www.monkey.org/x"), None));
    assert!(rule.applies(&canonical("http://monkey.org/x"), None));
    assert!(!rule.applies(&canonical("http://evil-monkey.org/x"), None));
}

#[test]
fn domain_plus_substring_rule_requires_both() {
    let rule = MatchRule::new().with_domain(b"monkey.org".to_vec()).with_substring(b"bar".to_vec());
    assert!(rule.applies(&canonical("http://monkey.org/foobar"), None));
    assert!(!rule.applies(&canonical("http://monkey.org/foo"), None));
    assert!(!rule.applies(&canonical("http://other.org/foobar"), None));
}

#[test]
fn surt_rule_scopes_to_a_path_prefix() {
    let rule = MatchRule::new().with_surt(b"http://(org,woop,)/fuh/".to_vec());
    assert!(rule.applies(&canonical("http://woop.org/fuh/whatever"), None));
    assert!(!rule.applies(&canonical("http://woop.org/other"), None));
}

#[test]
fn regex_and_parent_url_regex_rule_scopes_youtube_watch_pages() {
    let rule = MatchRule::new()
        .with_regex(r"https?://(www\.)?youtube\.com/watch\?.*")
        .unwrap()
        .with_parent_url_regex(r"https?://(www\.)?youtube\.com/user/.*")
        .unwrap();
    let watch = canonical("http://www.youtube.com/watch?v=abc123");
    let user_page = canonical("http://www.youtube.com/user/somebody");
    let other_page = canonical("http://example.com/");
    assert!(rule.applies(&watch, Some(&user_page)));
    assert!(!rule.applies(&watch, Some(&other_page)));
    assert!(!rule.applies(&watch, None));
}

#[test]
fn legacy_url_match_shim_round_trips_to_the_same_result_as_the_preferred_field() {
    let preferred = MatchRule::new().with_substring(b"bar".to_vec());
    let legacy = MatchRule::from_legacy("STRING_MATCH", b"bar".to_vec()).unwrap();
    let url = canonical("http://monkey.org/foobar");
    assert_eq!(preferred.applies(&url, None), legacy.applies(&url, None));
}

#[test]
fn legacy_url_match_shim_rejects_unknown_selector() {
    assert!(MatchRule::from_legacy("NOT_A_REAL_MATCH_KIND", b"x".to_vec()).is_err());
}

#[test]
fn normalize_host_then_host_matches_domain_handles_messy_input() {
    let host = normalize_host(b"..WWW.Monkey.ORG..");
    assert!(host_matches_domain(&host, b"monkey.org"));
}

//! Black-box tests of the sort-friendly key formats (surt/ssurt/ancestry)
//! against canonicalized URLs, the way an archive index would use them.

use urlcanon::{parse_url, surt, surt_ancestry, ssurt, WHATWG};

fn canonical(s: &str) -> urlcanon::ParsedUrl {
    let mut u = parse_url(s.as_bytes());
    WHATWG.canonicalize(&mut u);
    u
}

#[test]
fn surt_groups_urls_by_host_then_path() {
    let a = surt(&canonical("http://example.com/a"), true, true);
    let b = surt(&canonical("http://example.com/b"), true, true);
    let c = surt(&canonical("http://other.com/a"), true, true);
    assert!(a < b);
    assert!(a != c);
    assert!(a.starts_with(b"http://(com,example,)"));
}

#[test]
fn surt_sorts_subdomains_adjacent_to_parent_domain() {
    let parent = surt(&canonical("http://example.com/"), true, true);
    let sub = surt(&canonical("http://www.example.com/"), true, true);
    assert!(sub.starts_with(b"http://(com,example,"));
    assert!(parent.starts_with(b"http://(com,example,"));
}

#[test]
fn ssurt_reverses_host_and_sorts_by_authority_first() {
    let a = ssurt(&canonical("http://example.com/a"));
    let b = ssurt(&canonical("https://example.com/a"));
    assert!(a.starts_with(b"com,example,"));
    assert!(b.starts_with(b"com,example,"));
}

#[test]
fn surt_ancestry_walks_from_full_url_up_to_bare_scheme() {
    let u = canonical("http://example.com/a/b/c");
    let ancestry = surt_ancestry(&u);
    assert_eq!(ancestry[0], surt(&u, true, true));
    assert_eq!(ancestry[3], b"http://(com,example,)".to_vec());
    let last = ancestry.last().unwrap();
    assert_eq!(last, &b"http://(".to_vec());
    // Every entry is a strict prefix of the one before it.
    for pair in ancestry.windows(2) {
        assert!(pair[0].starts_with(&pair[1]));
        assert!(pair[0].len() > pair[1].len());
    }
}

#[test]
fn surt_ancestry_is_empty_for_opaque_schemes() {
    let u = canonical("mailto:someone@example.com");
    assert!(surt_ancestry(&u).is_empty());
}

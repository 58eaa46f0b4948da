//! Sort-friendly key formatters, ported from
//! `examples/original_source/python/urlcanon/parse.py::ParsedUrl.{ssurt,surt,surt_ancestry}`
//! and `examples/original_source/python/urlcanon/__init__.py::{reverse_host,ssurt_host}`.

use crate::ipaddr;
use crate::parsed_url::ParsedUrl;
use crate::schemes;

/// Reverse dotted segments and swap commas for dots, e.g. `x,y.b.c` →
/// `c,b,x.y,`. Hosts that are a bracketed IPv6 literal or that parse as
/// IPv4 are returned unchanged, since reversing an address's octets would
/// not be meaningful for range queries.
pub fn reverse_host(host: &[u8], trailing_comma: bool) -> Vec<u8> {
    if host.is_empty() || host[0] == b'[' || ipaddr::parse_ipv4(host).is_some() {
        return host.to_vec();
    }
    let mut parts: Vec<Vec<u8>> = host
        .split(|&b| b == b'.')
        .map(|part| part.iter().map(|&b| if b == b',' { b'.' } else { b }).collect())
        .collect();
    parts.reverse();
    if trailing_comma {
        parts.push(Vec::new());
    }
    let mut out = Vec::with_capacity(host.len() + parts.len());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(part);
    }
    out
}

/// `leading_junk + reverse_host(host) + slashes + port + colon_before_port
/// + scheme + at_sign + username + colon_before_password + password +
/// colon_after_scheme + path + question_mark + query + hash_sign +
/// fragment + trailing_junk`.
///
/// The unusual field order (port and scheme *after* the reversed host, and
/// swapped relative to their normal positions) is what makes URLs sharing a
/// host sort adjacently regardless of scheme or port.
pub fn ssurt(url: &ParsedUrl) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&url.leading_junk);
    out.extend_from_slice(&reverse_host(&url.host, true));
    out.extend_from_slice(&url.slashes);
    out.extend_from_slice(&url.port);
    out.extend_from_slice(&url.colon_before_port);
    out.extend_from_slice(&url.scheme);
    out.extend_from_slice(&url.at_sign);
    out.extend_from_slice(&url.username);
    out.extend_from_slice(&url.colon_before_password);
    out.extend_from_slice(&url.password);
    out.extend_from_slice(&url.colon_after_scheme);
    out.extend_from_slice(&url.path);
    out.extend_from_slice(&url.question_mark);
    out.extend_from_slice(&url.query);
    out.extend_from_slice(&url.hash_sign);
    out.extend_from_slice(&url.fragment);
    out.extend_from_slice(&url.trailing_junk);
    out
}

/// SURT: `com,example,)/path?query` (or, `with_scheme`, `http://(com,example,)/path?query`).
pub fn surt(url: &ParsedUrl, trailing_comma: bool, with_scheme: bool) -> Vec<u8> {
    let mut out = url.leading_junk.clone();
    if with_scheme {
        out.extend_from_slice(&url.scheme);
        out.extend_from_slice(&url.colon_after_scheme);
        out.extend_from_slice(&url.slashes);
    }
    if !url.host.is_empty() {
        if with_scheme {
            out.push(b'(');
        }
        out.extend_from_slice(&reverse_host(&url.host, false));
        out.extend_from_slice(&url.colon_before_port);
        out.extend_from_slice(&url.port);
        if trailing_comma {
            out.push(b',');
        }
        out.push(b')');
    }
    out.extend_from_slice(&url.path);
    out.extend_from_slice(&url.question_mark);
    out.extend_from_slice(&url.query);
    out.extend_from_slice(&url.hash_sign);
    out.extend_from_slice(&url.fragment);
    out.extend_from_slice(&url.trailing_junk);
    out
}

/// SURT prefixes from most-specific (the full SURT) to least-specific
/// (just the scheme/slashes/opening paren), for archive-index prefix-range
/// enumeration. Restricted to special schemes, matching the original.
pub fn surt_ancestry(url: &ParsedUrl) -> Vec<Vec<u8>> {
    let scheme_lower = url.scheme.to_ascii_lowercase();
    if !schemes::is_special(&scheme_lower) {
        return Vec::new();
    }

    let mut parts: Vec<Vec<u8>> = Vec::new();
    let mut scheme_part = url.scheme.clone();
    scheme_part.extend_from_slice(&url.colon_after_scheme);
    scheme_part.extend_from_slice(&url.slashes);
    parts.push(scheme_part);

    if !url.host.is_empty() {
        if let Some(last) = parts.last_mut() {
            last.push(b'(');
        }
        for label in reverse_host(&url.host, false).split(|&b| b == b',') {
            let mut part = label.to_vec();
            part.push(b',');
            parts.push(part);
        }
        if !url.port.is_empty() {
            let mut part = url.colon_before_port.clone();
            part.extend_from_slice(&url.port);
            part.push(b')');
            parts.push(part);
        } else {
            parts.push(vec![b')']);
        }
    }

    let mut path_parts: Vec<&[u8]> = url.path.split(|&b| b == b'/').collect();
    if path_parts.first() == Some(&&b""[..]) {
        path_parts.remove(0);
    }
    for segment in path_parts {
        let mut part = vec![b'/'];
        part.extend_from_slice(segment);
        parts.push(part);
    }
    if !url.query.is_empty() {
        let mut part = url.question_mark.clone();
        part.extend_from_slice(&url.query);
        parts.push(part);
    }
    if !url.fragment.is_empty() {
        let mut part = url.hash_sign.clone();
        part.extend_from_slice(&url.fragment);
        parts.push(part);
    }
    if !url.trailing_junk.is_empty() {
        parts.push(url.trailing_junk.clone());
    }

    let mut result = Vec::new();
    while !parts.is_empty() {
        result.push(parts.concat());
        parts.pop();
    }
    result
}

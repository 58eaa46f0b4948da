//! Canonicalization steps: independent mutators over a [`ParsedUrl`].
//! Grounded on `Canonicalizer`'s static methods in
//! `examples/original_source/python/urlcanon/canon.py`; each step here is
//! the same operation, field-for-field.

use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::idna_host;
use crate::ipaddr;
use crate::parsed_url::{self, ParsedUrl};
use crate::pathdots;
use crate::percent;
use crate::schemes;

pub fn remove_leading_trailing_junk(url: &mut ParsedUrl) {
    url.leading_junk.clear();
    url.trailing_junk.clear();
}

/// Deletes `\t`/`\n`/`\r` from every textual field, not just the ones the
/// named pipelines happen to still need it on after `remove_leading_trailing_junk`
/// has already cleared `leading_junk`/`trailing_junk`.
pub fn remove_tabs_and_newlines(url: &mut ParsedUrl) {
    fn strip(field: &mut Vec<u8>) {
        field.retain(|b| !matches!(b, b'\t' | b'\n' | b'\r'));
    }
    strip(&mut url.leading_junk);
    strip(&mut url.scheme);
    strip(&mut url.colon_after_scheme);
    strip(&mut url.slashes);
    strip(&mut url.username);
    strip(&mut url.colon_before_password);
    strip(&mut url.password);
    strip(&mut url.at_sign);
    strip(&mut url.host);
    strip(&mut url.colon_before_port);
    strip(&mut url.port);
    strip(&mut url.path);
    strip(&mut url.question_mark);
    strip(&mut url.query);
    strip(&mut url.hash_sign);
    strip(&mut url.fragment);
    strip(&mut url.trailing_junk);
}

pub fn lowercase_scheme(url: &mut ParsedUrl) {
    url.scheme = url.scheme.to_ascii_lowercase();
}

/// Special schemes only: `\` in `slashes` and `path` becomes `/`.
pub fn fix_backslashes(url: &mut ParsedUrl) {
    if !url.is_special_scheme() {
        return;
    }
    for b in url.slashes.iter_mut() {
        *b = b'/';
    }
    for b in url.path.iter_mut() {
        if *b == b'\\' {
            *b = b'/';
        }
    }
}

pub fn normalize_path_dots(url: &mut ParsedUrl) {
    let special = url.is_special_scheme();
    url.path = pathdots::resolve_path_dots(&url.path, special);
}

pub fn pct_encode_path(url: &mut ParsedUrl) {
    let set = if url.path.first() == Some(&b'/') || url.is_special_scheme() {
        percent::PATH_SET
    } else {
        percent::C0_SET
    };
    url.path = percent::encode(&url.path, set);
}

pub fn pct_encode_userinfo(url: &mut ParsedUrl) {
    url.username = percent::encode(&url.username, percent::USERINFO_SET);
    url.password = percent::encode(&url.password, percent::USERINFO_SET);
}

pub fn pct_encode_query(url: &mut ParsedUrl) {
    url.query = percent::encode(&url.query, percent::QUERY_SET);
}

pub fn pct_encode_fragment(url: &mut ParsedUrl) {
    url.fragment = percent::encode(&url.fragment, percent::C0_SET);
}

pub fn pct_encode_host(url: &mut ParsedUrl) {
    url.host = percent::encode(&url.host, percent::HOST_SET);
}

/// Special schemes only.
pub fn pct_decode_host(url: &mut ParsedUrl) {
    if !url.is_special_scheme() {
        return;
    }
    url.host = percent::decode_repeatedly(&url.host);
}

fn decode_fields(url: &mut ParsedUrl, include_query: bool) {
    url.scheme = percent::decode_repeatedly(&url.scheme);
    url.username = percent::decode_repeatedly(&url.username);
    url.password = percent::decode_repeatedly(&url.password);
    url.host = percent::decode_repeatedly(&url.host);
    url.port = percent::decode_repeatedly(&url.port);
    url.path = percent::decode_repeatedly(&url.path);
    if include_query {
        url.query = percent::decode_repeatedly(&url.query);
    }
    url.fragment = percent::decode_repeatedly(&url.fragment);
}

pub fn pct_decode_repeatedly(url: &mut ParsedUrl) {
    decode_fields(url, true);
}

pub fn pct_decode_repeatedly_except_query(url: &mut ParsedUrl) {
    decode_fields(url, false);
}

pub fn reparse_host(url: &mut ParsedUrl) {
    let (ip4, ip6) = ipaddr::parse_ipv4_or_6(&url.host);
    url.ip4 = ip4;
    url.ip6 = ip6;
}

pub fn normalize_ip_address(url: &mut ParsedUrl) {
    if let Some(ip4) = url.ip4 {
        url.host = ipaddr::format_ipv4(ip4).into_bytes();
    } else if let Some(ip6) = url.ip6 {
        url.host = format!("[{}]", ipaddr::format_ipv6(ip6)).into_bytes();
    }
}

/// Special schemes only; IP-literal hosts are left alone.
pub fn punycode_special_host(url: &mut ParsedUrl) {
    if !url.is_special_scheme() || url.ip4.is_some() || url.ip6.is_some() {
        return;
    }
    let host = String::from_utf8_lossy(&url.host).into_owned();
    url.host = idna_host::to_ascii(&host).into_bytes();
}

pub fn empty_path_to_slash(url: &mut ParsedUrl) {
    if url.path.is_empty() && !url.authority().is_empty() && url.is_special_scheme() {
        url.path = b"/".to_vec();
    }
}

pub fn leading_slash(url: &mut ParsedUrl) {
    if url.is_special_scheme() && url.path.first() != Some(&b'/') {
        let mut path = Vec::with_capacity(url.path.len() + 1);
        path.push(b'/');
        path.extend_from_slice(&url.path);
        url.path = path;
    }
}

pub fn elide_default_port(url: &mut ParsedUrl) {
    if !url.is_special_scheme() {
        return;
    }
    let scheme = url.scheme.to_ascii_lowercase();
    if let Some(default) = schemes::default_port(&scheme) {
        if url.port == default {
            url.colon_before_port.clear();
            url.port.clear();
        }
    }
}

pub fn clean_up_userinfo(url: &mut ParsedUrl) {
    if url.password.is_empty() {
        url.colon_before_password.clear();
    }
    if url.username.is_empty() && url.password.is_empty() {
        url.at_sign.clear();
    }
}

pub fn two_slashes(url: &mut ParsedUrl) {
    let has_authority = !url.host.is_empty() || !url.username.is_empty() || !url.password.is_empty();
    let is_file = url.scheme.eq_ignore_ascii_case(b"file");
    if has_authority || !url.slashes.is_empty() || is_file {
        url.slashes = b"//".to_vec();
    }
}

/// If `scheme` is empty, assigns `http:` and re-runs pathish parsing, since
/// scheme presence changes which pathish regime (special/non-special)
/// applied the first time around.
pub fn default_scheme_http(url: &mut ParsedUrl) {
    if !url.scheme.is_empty() {
        return;
    }
    let mut pathish = url.slashes.clone();
    pathish.extend_from_slice(&url.authority());
    pathish.extend_from_slice(&url.path);

    url.scheme = b"http".to_vec();
    url.colon_after_scheme = b":".to_vec();
    url.slashes.clear();
    url.username.clear();
    url.colon_before_password.clear();
    url.password.clear();
    url.at_sign.clear();
    url.host.clear();
    url.ip4 = None;
    url.ip6 = None;
    url.colon_before_port.clear();
    url.port.clear();
    url.path.clear();

    parsed_url::parse_pathish(url, &pathish);
}

/// Special schemes only.
pub fn collapse_consecutive_slashes(url: &mut ParsedUrl) {
    if !url.is_special_scheme() {
        return;
    }
    let mut out = Vec::with_capacity(url.path.len());
    let mut prev_slash = false;
    for &b in &url.path {
        if b == b'/' {
            if !prev_slash {
                out.push(b);
            }
            prev_slash = true;
        } else {
            out.push(b);
            prev_slash = false;
        }
    }
    url.path = out;
}

/// Strip leading/trailing dots and collapse internal runs of dots to one.
pub(crate) fn collapse_host_dots(host: &[u8]) -> Vec<u8> {
    let mut start = 0;
    let mut end = host.len();
    while start < end && host[start] == b'.' {
        start += 1;
    }
    while end > start && host[end - 1] == b'.' {
        end -= 1;
    }
    let mut out = Vec::with_capacity(end - start);
    let mut prev_dot = false;
    for &b in &host[start..end] {
        if b == b'.' {
            if !prev_dot {
                out.push(b);
            }
            prev_dot = true;
        } else {
            out.push(b);
            prev_dot = false;
        }
    }
    out
}

pub fn fix_host_dots(url: &mut ParsedUrl) {
    url.host = collapse_host_dots(&url.host);
}

pub fn remove_fragment(url: &mut ParsedUrl) {
    url.hash_sign.clear();
    url.fragment.clear();
}

pub fn remove_userinfo(url: &mut ParsedUrl) {
    url.username.clear();
    url.colon_before_password.clear();
    url.password.clear();
    url.at_sign.clear();
}

pub fn alpha_reorder_query(url: &mut ParsedUrl) {
    if url.query.is_empty() {
        return;
    }
    let mut parts: Vec<&[u8]> = url.query.split(|&b| b == b'&').collect();
    parts.sort();
    let mut out = Vec::with_capacity(url.query.len());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(b'&');
        }
        out.extend_from_slice(part);
    }
    url.query = out;
}

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("static regex is valid"))
        }
    };
}

// `(?-u)` disables Unicode mode so these run over arbitrary bytes rather
// than requiring valid UTF-8, matching `parsed_url`'s byte-regex patterns.
static_regex!(
    session_id_query_regex,
    r"(?i-u)jsessionid=[0-9a-z$]{10,}|sessionid=[0-9a-z]{16,}|phpsessid=[0-9a-z]{16,}|sid=[0-9a-z]{16,}|aspsessionid[a-z]{8}=[0-9a-z]{16,}|cfid=[0-9]+&cftoken=[0-9a-z-]+"
);

static_regex!(aspx_single_session_regex, r"(?i-u)(/)\([0-9a-z]{24}\)/");
static_regex!(aspx_chained_session_regex, r"(?i-u)(/)(?:\([a-z]\([0-9a-z]{24}\)\))+/");
static_regex!(trailing_jsessionid_regex, r"(?i-u);jsessionid=[0-9a-z]{32}$");

/// The six well-known session-ID query parameters (jsessionid, sessionid,
/// phpsessid, sid, aspsessionid, and the cfid/cftoken pair).
pub fn strip_session_ids_from_query(url: &mut ParsedUrl) {
    url.query = session_id_query_regex().replace_all(&url.query, &b""[..]).into_owned();
}

fn path_ends_with_aspx(path: &[u8]) -> bool {
    path.len() >= 5 && path[path.len() - 5..].eq_ignore_ascii_case(b".aspx")
}

/// ASP.NET path-embedded session segments (only when the path ends
/// `.aspx`), plus the anywhere-applicable trailing `;jsessionid=...`.
pub fn strip_session_ids_from_path(url: &mut ParsedUrl) {
    if path_ends_with_aspx(&url.path) {
        let step1 = aspx_single_session_regex().replace_all(&url.path, &b"$1"[..]);
        let step2 = aspx_chained_session_regex().replace_all(&step1, &b"$1"[..]);
        url.path = step2.into_owned();
    }
    url.path = trailing_jsessionid_regex().replace(&url.path, &b""[..]).into_owned();
}

pub fn strip_trailing_slash_unless_empty(url: &mut ParsedUrl) {
    if url.path.len() > 1 && url.path.last() == Some(&b'/') {
        url.path.pop();
    }
}

pub fn remove_redundant_ampersands_from_query(url: &mut ParsedUrl) {
    let mut out = Vec::with_capacity(url.query.len());
    let mut prev_amp = false;
    for &b in &url.query {
        if b == b'&' {
            if !prev_amp {
                out.push(b);
            }
            prev_amp = true;
        } else {
            out.push(b);
            prev_amp = false;
        }
    }
    while out.first() == Some(&b'&') {
        out.remove(0);
    }
    while out.last() == Some(&b'&') {
        out.pop();
    }
    url.query = out;
}

pub fn omit_question_mark_if_query_empty(url: &mut ParsedUrl) {
    if url.query.is_empty() {
        url.question_mark.clear();
    }
}

pub fn https_to_http(url: &mut ParsedUrl) {
    if url.scheme.eq_ignore_ascii_case(b"https") {
        url.scheme = b"http".to_vec();
    }
}

fn is_www_label(label: &[u8]) -> bool {
    let lower = label.to_ascii_lowercase();
    lower == b"www" || (lower.len() == 4 && lower.starts_with(b"www") && matches!(lower[3], b'1'..=b'9'))
}

/// Strips a leading `www`/`www1`..`www9` label from `host`.
pub fn strip_www(url: &mut ParsedUrl) {
    let dot_pos = match url.host.iter().position(|&b| b == b'.') {
        Some(p) => p,
        None => return,
    };
    if is_www_label(&url.host[..dot_pos]) {
        url.host = url.host[dot_pos + 1..].to_vec();
    }
}

pub fn lowercase_path(url: &mut ParsedUrl) {
    url.path = url.path.to_ascii_lowercase();
}

pub fn lowercase_query(url: &mut ParsedUrl) {
    url.query = url.query.to_ascii_lowercase();
}

/// Google Safe Browsing canonical form: re-encodes path, userinfo, query,
/// and fragment under [`percent::GOOGLE_SET`].
pub fn google_pct_encode(url: &mut ParsedUrl) {
    url.path = percent::encode(&url.path, percent::GOOGLE_SET);
    url.username = percent::encode(&url.username, percent::GOOGLE_SET);
    url.password = percent::encode(&url.password, percent::GOOGLE_SET);
    url.query = percent::encode(&url.query, percent::GOOGLE_SET);
    url.fragment = percent::encode(&url.fragment, percent::GOOGLE_SET);
}

/// Re-encodes path, userinfo, and fragment under the narrower
/// [`percent::LESS_DUMB_SET`] used by the `semantic*` pipelines. Query is
/// handled separately by [`less_dumb_pct_recode_query`].
pub fn less_dumb_pct_encode(url: &mut ParsedUrl) {
    url.path = percent::encode(&url.path, percent::LESS_DUMB_SET);
    url.username = percent::encode(&url.username, percent::LESS_DUMB_SET);
    url.password = percent::encode(&url.password, percent::LESS_DUMB_SET);
    url.fragment = percent::encode(&url.fragment, percent::LESS_DUMB_SET);
}

/// Decodes `query` to a fixed point, then re-encodes it under
/// [`percent::LESS_DUMB_QUERY_SET`]. Needed because the `semantic*`
/// pipelines decode every field except `query` earlier on.
pub fn less_dumb_pct_recode_query(url: &mut ParsedUrl) {
    let decoded = percent::decode_repeatedly(&url.query);
    url.query = percent::encode(&decoded, percent::LESS_DUMB_QUERY_SET);
}

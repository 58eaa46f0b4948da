//! Percent-encoding and -decoding, and the scheme/field-dependent encode sets.
//!
//! Built on the real `percent-encoding` crate rather than a hand-rolled
//! encoder: its `AsciiSet` already percent-encodes every byte `>= 0x80`
//! unconditionally and only needs the ASCII members of each set spelled out,
//! and it already emits uppercase hex.

use percent_encoding::{percent_decode as pct_decode, percent_encode as pct_encode, AsciiSet, CONTROLS};

/// `[\x00-\x1f\x7f-\xff]` — bytes `>= 0x80` are encoded unconditionally by
/// the underlying `AsciiSet` machinery, so `CONTROLS` (0x00-0x1F and 0x7F)
/// is exactly this set.
pub const C0_SET: &AsciiSet = &CONTROLS;

/// `[\x00-\x20\x7f-\xff"#<>?`{}]`
pub const PATH_SET: &AsciiSet = &C0_SET
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Path set plus `/ : ; = @ [ \ ] ^ |`.
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// `[\x00-\x20"#<>\x7f-\xff]`
pub const QUERY_SET: &AsciiSet = &C0_SET.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');

/// `[\x00-\x20\x7f-\xff]` — the conservative host encode set.
pub const HOST_SET: &AsciiSet = &C0_SET.add(b' ');

/// Google Safe Browsing encode set: `<= 0x20`, `>= 0x7f`, `#`, `%`.
pub const GOOGLE_SET: &AsciiSet = &C0_SET.add(b' ').add(b'#').add(b'%');

/// The "less dumb" encode set used by the `semantic`/`semantic_precise`
/// pipelines: narrower than [`PATH_SET`], matching the Google set's
/// conservatism. `less_dumb_pct_encode` is an alternative (narrower) set in
/// the same family as `google_pct_encode`; see DESIGN.md for this choice.
pub const LESS_DUMB_SET: &AsciiSet = GOOGLE_SET;

/// Same family, used when recoding query strings for the semantic
/// pipelines: excluding `&`/`=` is unnecessary since neither byte is ever a
/// control/space/`#`/`%` byte, but kept as a distinct name to mirror the
/// separate `less_dumb_pct_recode_query` step.
pub const LESS_DUMB_QUERY_SET: &AsciiSet = GOOGLE_SET;

/// Percent-encode `input` under `set`, appending `%XX` (uppercase hex) for
/// every byte that matches plus every byte `>= 0x80`.
pub fn encode(input: &[u8], set: &'static AsciiSet) -> Vec<u8> {
    pct_encode(input, set).to_string().into_bytes()
}

/// Percent-decode `input`. Malformed `%` sequences pass through literally.
pub fn decode(input: &[u8]) -> Vec<u8> {
    pct_decode(input).collect()
}

/// Percent-decode repeatedly until a fixed point: needed to normalize
/// adversarially multi-encoded input (`%2561` -> `%61` -> `a`).
/// Terminates because each pass is non-expanding and `decode` is a no-op on
/// a string with no valid `%XX` escapes.
pub fn decode_repeatedly(input: &[u8]) -> Vec<u8> {
    let mut current = input.to_vec();
    loop {
        let next = decode(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

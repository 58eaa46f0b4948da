//! The fixed "special scheme" table.

/// `(scheme, default_port)`. `file` has no default port.
const SPECIAL_SCHEMES: &[(&[u8], Option<&[u8]>)] = &[
    (b"ftp", Some(b"21")),
    (b"gopher", Some(b"70")),
    (b"http", Some(b"80")),
    (b"https", Some(b"443")),
    (b"ws", Some(b"80")),
    (b"wss", Some(b"443")),
    (b"file", None),
];

/// Is `scheme` (expected already lowercased) one of the special schemes?
pub fn is_special(scheme: &[u8]) -> bool {
    SPECIAL_SCHEMES.iter().any(|(s, _)| *s == scheme)
}

/// The default port bytes for `scheme`, if any.
pub fn default_port(scheme: &[u8]) -> Option<&'static [u8]> {
    SPECIAL_SCHEMES
        .iter()
        .find(|(s, _)| *s == scheme)
        .and_then(|(_, port)| *port)
}

pub fn is_file(scheme: &[u8]) -> bool {
    scheme == b"file"
}

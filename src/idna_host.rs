//! IDNA host encoding adapter, backing the `punycode_special_host` step.
//!
//! This crate treats IDNA as an external capability: the real `idna` crate
//! does the UTS-46 processing. When it errors, this falls back to a
//! label-by-label Punycode encode using `idna::punycode`, and if even that
//! fails, to an ASCII-lowercased identity, so that this step is total and
//! never the reason a canonicalization pipeline panics.

/// IDNA-encode `host` to ASCII. Always returns a value: primary UTS-46
/// (IDNA2008-flavored) processing, falling back to per-label Punycode, and
/// finally to ASCII-lowercasing the input unchanged.
pub fn to_ascii(host: &str) -> String {
    if let Ok(ascii) = idna::domain_to_ascii(host) {
        return ascii;
    }
    if let Some(fallback) = label_by_label_punycode(host) {
        return fallback;
    }
    host.to_ascii_lowercase()
}

fn label_by_label_punycode(host: &str) -> Option<String> {
    let mut labels = Vec::new();
    for label in host.split('.') {
        if label.is_ascii() {
            labels.push(label.to_ascii_lowercase());
        } else {
            let encoded = idna::punycode::encode_str(&label.to_lowercase())?;
            labels.push(format!("xn--{}", encoded));
        }
    }
    Some(labels.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_host_passthrough() {
        assert_eq!(to_ascii("example.com"), "example.com");
    }

    #[test]
    fn unicode_host_punycoded() {
        let out = to_ascii("bücher.example");
        assert!(out.starts_with("xn--"), "got {out}");
        assert!(out.ends_with(".example"));
    }

    #[test]
    fn uppercase_lowered() {
        assert_eq!(to_ascii("EXAMPLE.COM"), "example.com");
    }
}

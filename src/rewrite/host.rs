//! Host header parsing.
//!
//! # Responsibilities
//! - Split an optional port off a host value
//! - Extract the subdomain (labels left of the registered domain)
//! - Compute the registered domain, used when building absolute URLs
//!
//! # Design Decisions
//! - Host comparison is case-insensitive (RFC 9110); labels are
//!   returned lowercase
//! - IP literals never carry a subdomain
//! - The registered domain is the `tld_length + 1` rightmost labels

use url::Host;

/// Split `host[:port]` into its parts. Bracketed IPv6 literals are kept whole.
pub fn split_port(host: &str) -> (&str, Option<&str>) {
    if host.starts_with('[') {
        return match host.find("]:") {
            Some(idx) => (&host[..=idx], Some(&host[idx + 2..])),
            None => (host, None),
        };
    }

    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => (name, Some(port)),
        _ => (host, None),
    }
}

fn is_ip_literal(name: &str) -> bool {
    matches!(Host::parse(name), Ok(Host::Ipv4(_)) | Ok(Host::Ipv6(_)))
}

fn labels(host: &str) -> Option<Vec<String>> {
    let (name, _) = split_port(host.trim());
    let name = name.trim_end_matches('.').to_ascii_lowercase();
    if name.is_empty() || is_ip_literal(&name) {
        return None;
    }
    Some(name.split('.').map(str::to_string).collect())
}

/// The subdomain of `host`, if any.
///
/// `foo.example.com` → `Some("foo")`, `a.b.example.com` → `Some("a.b")`,
/// `example.com` / `localhost` / `127.0.0.1` → `None`.
pub fn subdomain_of(host: &str, tld_length: usize) -> Option<String> {
    let labels = labels(host)?;
    let domain_labels = tld_length + 1;
    if labels.len() <= domain_labels {
        return None;
    }

    let sub = labels[..labels.len() - domain_labels].join(".");
    if sub.is_empty() {
        None
    } else {
        Some(sub)
    }
}

/// The registered domain of `host`, without port.
///
/// IP literals and hosts with fewer labels than the domain are returned
/// as-is (minus the port).
pub fn domain_of(host: &str, tld_length: usize) -> String {
    let (name, _) = split_port(host.trim());
    match labels(host) {
        Some(labels) if labels.len() > tld_length + 1 => labels[labels.len() - tld_length - 1..].join("."),
        _ => name.to_ascii_lowercase(),
    }
}

/// Whether `label` can stand in front of a registered domain: one or more
/// `.`-separated DNS labels of `[a-z0-9-]`, each 1 to 63 bytes long and
/// neither starting nor ending with `-`.
///
/// Labels are lowercase because the inbound rewriter only ever sees
/// lowercase subdomains.
pub fn is_valid_subdomain(label: &str) -> bool {
    !label.is_empty()
        && label.split('.').all(|part| {
            !part.is_empty()
                && part.len() <= 63
                && !part.starts_with('-')
                && !part.ends_with('-')
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_port() {
        assert_eq!(split_port("example.com:8080"), ("example.com", Some("8080")));
        assert_eq!(split_port("example.com"), ("example.com", None));
        assert_eq!(split_port("[::1]:3000"), ("[::1]", Some("3000")));
        assert_eq!(split_port("[::1]"), ("[::1]", None));
    }

    #[test]
    fn test_subdomain_of() {
        assert_eq!(subdomain_of("bar.example.com", 1).as_deref(), Some("bar"));
        assert_eq!(subdomain_of("BAR.Example.com:3000", 1).as_deref(), Some("bar"));
        assert_eq!(subdomain_of("a.b.example.com", 1).as_deref(), Some("a.b"));
        assert_eq!(subdomain_of("www.example.com", 1).as_deref(), Some("www"));
        assert_eq!(subdomain_of("example.com", 1), None);
        assert_eq!(subdomain_of("localhost", 1), None);
        assert_eq!(subdomain_of("", 1), None);
    }

    #[test]
    fn test_subdomain_of_ip_literal() {
        assert_eq!(subdomain_of("127.0.0.1", 1), None);
        assert_eq!(subdomain_of("127.0.0.1:3000", 1), None);
        assert_eq!(subdomain_of("[::1]:3000", 1), None);
    }

    #[test]
    fn test_subdomain_of_long_tld() {
        assert_eq!(subdomain_of("foo.example.co.uk", 2).as_deref(), Some("foo"));
        assert_eq!(subdomain_of("example.co.uk", 2), None);
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("foo.example.com", 1), "example.com");
        assert_eq!(domain_of("www.example.com:3000", 1), "example.com");
        assert_eq!(domain_of("example.com", 1), "example.com");
        assert_eq!(domain_of("127.0.0.1:3000", 1), "127.0.0.1");
    }

    #[test]
    fn test_is_valid_subdomain() {
        assert!(is_valid_subdomain("foobar"));
        assert!(is_valid_subdomain("a.b"));
        assert!(is_valid_subdomain("my-blog2"));

        assert!(!is_valid_subdomain(""));
        assert!(!is_valid_subdomain("evil.com/"));
        assert!(!is_valid_subdomain("user@evil.com"));
        assert!(!is_valid_subdomain("a:80"));
        assert!(!is_valid_subdomain("x?y"));
        assert!(!is_valid_subdomain("a..b"));
        assert!(!is_valid_subdomain("-a"));
        assert!(!is_valid_subdomain("FooBar"));
        assert!(!is_valid_subdomain(&"a".repeat(64)));
    }
}

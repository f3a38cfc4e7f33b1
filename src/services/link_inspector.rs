// src/services/link_inspector.rs

use serde::Serialize;
use url::{Host, Url};

const MAX_REASONABLE_LENGTH: usize = 100;
const MAX_HOST_LABELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedFlag {
    InsecureScheme,
    IpAddressHost,
    Punycode,
    EmbeddedCredentials,
    ManySubdomains,
    DigitLookalike,
    NonStandardPort,
    LongUrl,
}

impl RedFlag {
    pub fn describe(&self) -> &'static str {
        match self {
            RedFlag::InsecureScheme => "Uses plain http, so traffic is not encrypted",
            RedFlag::IpAddressHost => "Points at a raw IP address instead of a domain",
            RedFlag::Punycode => "Contains punycode, which can disguise look-alike characters",
            RedFlag::EmbeddedCredentials => {
                "Has text before an @, which hides the real destination"
            }
            RedFlag::ManySubdomains => "Uses a long chain of subdomains",
            RedFlag::DigitLookalike => "Swaps letters for digits, like payp4l",
            RedFlag::NonStandardPort => "Uses a non-standard port",
            RedFlag::LongUrl => "Is unusually long",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlagReport {
    pub flag: RedFlag,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LinkReport {
    pub url: String,
    pub host: Option<String>,
    pub risk: &'static str,
    pub flags: Vec<FlagReport>,
}

pub fn inspect(raw: &str) -> Result<LinkReport, url::ParseError> {
    let raw = raw.trim();
    let url = Url::parse(raw)?;
    let mut flags = Vec::new();

    if url.scheme() == "http" {
        flags.push(RedFlag::InsecureScheme);
    }
    if !url.username().is_empty() || url.password().is_some() {
        flags.push(RedFlag::EmbeddedCredentials);
    }
    if url.port().is_some() {
        flags.push(RedFlag::NonStandardPort);
    }

    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => flags.push(RedFlag::IpAddressHost),
        Some(Host::Domain(domain)) => {
            let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
            if labels.iter().any(|l| l.starts_with("xn--")) {
                flags.push(RedFlag::Punycode);
            }
            if labels.len() > MAX_HOST_LABELS {
                flags.push(RedFlag::ManySubdomains);
            }
            if labels.iter().any(|l| has_digit_lookalike(l)) {
                flags.push(RedFlag::DigitLookalike);
            }
        }
        None => {}
    }

    if raw.len() > MAX_REASONABLE_LENGTH {
        flags.push(RedFlag::LongUrl);
    }

    let risk = match flags.len() {
        0 => "low",
        1 | 2 => "medium",
        _ => "high",
    };

    Ok(LinkReport {
        url: url.to_string(),
        host: url.host_str().map(str::to_string),
        risk,
        flags: flags
            .into_iter()
            .map(|flag| FlagReport {
                flag,
                message: flag.describe(),
            })
            .collect(),
    })
}

/// A digit commonly used in place of a letter (0→o, 1→l, 3→e, 4→a, 5→s),
/// sitting between two letters.
fn has_digit_lookalike(label: &str) -> bool {
    let chars: Vec<char> = label.chars().collect();
    chars.windows(3).any(|w| {
        w[0].is_ascii_alphabetic()
            && matches!(w[1], '0' | '1' | '3' | '4' | '5')
            && w[2].is_ascii_alphabetic()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_of(raw: &str) -> Vec<RedFlag> {
        inspect(raw).unwrap().flags.into_iter().map(|f| f.flag).collect()
    }

    #[test]
    fn test_clean_https_link() {
        let report = inspect("https://www.example.com/account").unwrap();
        assert!(report.flags.is_empty());
        assert_eq!(report.risk, "low");
        assert_eq!(report.host.as_deref(), Some("www.example.com"));
    }

    #[test]
    fn test_lookalike_over_http() {
        let flags = flags_of("http://payp4l-support.com/verify");
        assert_eq!(flags, vec![RedFlag::InsecureScheme, RedFlag::DigitLookalike]);
    }

    #[test]
    fn test_ip_with_credentials() {
        let report = inspect("http://paypal.com@192.168.10.4:8080/login").unwrap();
        let flags: Vec<RedFlag> = report.flags.iter().map(|f| f.flag).collect();
        assert!(flags.contains(&RedFlag::EmbeddedCredentials));
        assert!(flags.contains(&RedFlag::IpAddressHost));
        assert!(flags.contains(&RedFlag::NonStandardPort));
        assert_eq!(report.risk, "high");
    }

    #[test]
    fn test_punycode_and_subdomains() {
        let flags = flags_of("https://login.secure.account.xn--80ak6aa92e.com");
        assert!(flags.contains(&RedFlag::Punycode));
        assert!(flags.contains(&RedFlag::ManySubdomains));
    }

    #[test]
    fn test_year_in_path_is_not_lookalike() {
        assert!(!has_digit_lookalike("news2024"));
        assert!(has_digit_lookalike("go0gle"));
    }

    #[test]
    fn test_invalid_url() {
        assert!(inspect("not a url").is_err());
    }
}

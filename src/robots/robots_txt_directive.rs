/// One classified line of a robots.txt document.
#[derive(Debug, Clone, PartialEq)]
pub enum RobotsTxtDirective {
    UserAgent(String),
    Allow(String),
    Disallow(String),
    /// `None` when the value is not a number.
    CrawlDelay(Option<f64>),
    /// Keeps the raw value, inline comment included, so URLs containing `#` survive.
    Sitemap(String),
    Other { key: String, value: String },
}

impl RobotsTxtDirective {
    /// Classifies a single line. Returns `None` for comments, blank lines and
    /// lines without a `key: value` shape. An empty `User-agent:` value names
    /// the agent `""`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.starts_with('#') {
            return None;
        }
        let (key, raw_value) = line.split_once(':')?;
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        let raw_value = raw_value.trim();
        let value = strip_comment(raw_value);

        let directive = match key.as_str() {
            "user-agent" => Self::UserAgent(value.to_owned()),
            "allow" => Self::Allow(value.to_owned()),
            "disallow" => Self::Disallow(value.to_owned()),
            "crawl-delay" => Self::CrawlDelay(parse_delay(value)),
            "sitemap" => Self::Sitemap(raw_value.to_owned()),
            _ => Self::Other {
                key,
                value: raw_value.to_owned(),
            },
        };
        Some(directive)
    }
}

fn strip_comment(value: &str) -> &str {
    match value.split_once('#') {
        Some((before, _)) => before.trim(),
        None => value,
    }
}

/// Reads the leading decimal number, so `10 seconds` is 10. Negative,
/// infinite and NaN delays are rejected.
fn parse_delay(value: &str) -> Option<f64> {
    let bytes = value.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - integer_start;
    if bytes.get(end) == Some(&b'.') {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while bytes.get(fraction_end).is_some_and(u8::is_ascii_digit) {
            fraction_end += 1;
        }
        if fraction_end > fraction_start {
            digits += fraction_end - fraction_start;
            end = fraction_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while bytes.get(exponent_end).is_some_and(u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    let delay = value[..end].parse::<f64>().ok()?;
    (delay.is_finite() && delay >= 0.0).then_some(delay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_lines_without_separator() {
        assert_eq!(RobotsTxtDirective::parse("# User-agent: *"), None);
        assert_eq!(RobotsTxtDirective::parse("   # indented comment"), None);
        assert_eq!(RobotsTxtDirective::parse("Disallow /private"), None);
        assert_eq!(RobotsTxtDirective::parse(""), None);
        assert_eq!(RobotsTxtDirective::parse(": /orphan"), None);
    }

    #[test]
    fn keys_are_trimmed_and_case_insensitive() {
        assert_eq!(
            RobotsTxtDirective::parse("Disallow : /admin/"),
            Some(RobotsTxtDirective::Disallow("/admin/".to_owned()))
        );
        assert_eq!(
            RobotsTxtDirective::parse("USER-AGENT: FooBot"),
            Some(RobotsTxtDirective::UserAgent("FooBot".to_owned()))
        );
    }

    #[test]
    fn inline_comments_are_stripped_from_rules() {
        assert_eq!(
            RobotsTxtDirective::parse("Disallow: /team*     # comment"),
            Some(RobotsTxtDirective::Disallow("/team*".to_owned()))
        );
        assert_eq!(
            RobotsTxtDirective::parse("Allow:"),
            Some(RobotsTxtDirective::Allow(String::new()))
        );
    }

    #[test]
    fn sitemap_keeps_colons_and_raw_text() {
        assert_eq!(
            RobotsTxtDirective::parse("Sitemap: https://example.com:8080/map.xml#top"),
            Some(RobotsTxtDirective::Sitemap(
                "https://example.com:8080/map.xml#top".to_owned()
            ))
        );
    }

    #[test]
    fn crawl_delay_parses_floats() {
        assert_eq!(
            RobotsTxtDirective::parse("Crawl-delay: 2.5 # slow down"),
            Some(RobotsTxtDirective::CrawlDelay(Some(2.5)))
        );
        assert_eq!(
            RobotsTxtDirective::parse("Crawl-delay: soon"),
            Some(RobotsTxtDirective::CrawlDelay(None))
        );
        assert_eq!(
            RobotsTxtDirective::parse("Crawl-delay: 10 seconds"),
            Some(RobotsTxtDirective::CrawlDelay(Some(10.0)))
        );
        assert_eq!(
            RobotsTxtDirective::parse("Crawl-delay: .5s"),
            Some(RobotsTxtDirective::CrawlDelay(Some(0.5)))
        );
        assert_eq!(
            RobotsTxtDirective::parse("Crawl-delay: 1e1"),
            Some(RobotsTxtDirective::CrawlDelay(Some(10.0)))
        );
        for rejected in ["NaN", "inf", "-5", "1e999", "."] {
            assert_eq!(
                RobotsTxtDirective::parse(&format!("Crawl-delay: {rejected}")),
                Some(RobotsTxtDirective::CrawlDelay(None)),
                "{rejected} should be rejected"
            );
        }
    }

    #[test]
    fn empty_user_agent_names_the_empty_agent() {
        assert_eq!(
            RobotsTxtDirective::parse("User-agent:"),
            Some(RobotsTxtDirective::UserAgent(String::new()))
        );
    }

    #[test]
    fn unknown_keys_become_other() {
        assert_eq!(
            RobotsTxtDirective::parse("Host: example.com"),
            Some(RobotsTxtDirective::Other {
                key: "host".to_owned(),
                value: "example.com".to_owned(),
            })
        );
    }
}

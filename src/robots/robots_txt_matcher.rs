use crate::robots::robots_txt::RobotsTxt;
use crate::robots::robots_txt_pattern::RobotsTxtPattern;
use crate::robots::rule_set::{RuleKind, RuleSet};
use std::borrow::Cow;
use url::Url;

/// A pattern that matched a URL, with its precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternMatch<'a> {
    pub pattern: &'a RobotsTxtPattern,
    pub specificity: usize,
}

/// Every allow and disallow pattern matching a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport<'a> {
    pub allow: Vec<PatternMatch<'a>>,
    pub disallow: Vec<PatternMatch<'a>>,
}

/// The rule deciding a URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision<'a> {
    Allow(&'a RobotsTxtPattern),
    Disallow(&'a RobotsTxtPattern),
    /// No pattern matched.
    Unrestricted,
}

impl Decision<'_> {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Disallow(_))
    }
}

/// Answers allow/disallow queries against a [`RobotsTxt`] for one agent at a time.
///
/// The active agent can be switched with [`RobotsTxtMatcher::set_agent`]
/// without parsing the document again. Independent matchers over the same
/// document may be used from different threads.
#[derive(Debug, Clone)]
pub struct RobotsTxtMatcher<'a> {
    robots: &'a RobotsTxt,
    agent: String,
}

impl<'a> RobotsTxtMatcher<'a> {
    pub fn new(robots: &'a RobotsTxt, agent: &str) -> Self {
        Self {
            robots,
            agent: agent.to_owned(),
        }
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn set_agent(&mut self, agent: &str) {
        self.agent = agent.to_owned();
    }

    pub fn rules_for(&self, agent: &str) -> Option<&'a RuleSet> {
        self.robots.rules().rules_for(agent)
    }

    pub fn matching_patterns(&self, url: &str, kind: RuleKind) -> Vec<PatternMatch<'a>> {
        let Some(rules) = self.rules_for(&self.agent) else {
            return Vec::new();
        };
        let target = match_target(url);
        rules
            .patterns(kind)
            .iter()
            .filter(|pattern| pattern.matches(&target))
            .map(|pattern| PatternMatch {
                pattern,
                specificity: pattern.specificity(),
            })
            .collect()
    }

    pub fn matches(&self, url: &str) -> MatchReport<'a> {
        MatchReport {
            allow: self.matching_patterns(url, RuleKind::Allow),
            disallow: self.matching_patterns(url, RuleKind::Disallow),
        }
    }

    /// The most specific matching pattern. Ties go to the pattern listed first.
    pub fn best_match(&self, url: &str, kind: RuleKind) -> Option<PatternMatch<'a>> {
        self.matching_patterns(url, kind)
            .into_iter()
            .fold(None, |best, candidate| match best {
                Some(best) if best.specificity >= candidate.specificity => Some(best),
                _ => Some(candidate),
            })
    }

    /// Disallow wins only when strictly more specific than the best allow.
    pub fn decide(&self, url: &str) -> Decision<'a> {
        let disallow = self.best_match(url, RuleKind::Disallow);
        let allow = self.best_match(url, RuleKind::Allow);
        let allow_specificity = allow.map_or(0, |m| m.specificity);

        match (disallow, allow) {
            (Some(disallow), _) if disallow.specificity > allow_specificity => {
                Decision::Disallow(disallow.pattern)
            }
            (_, Some(allow)) => Decision::Allow(allow.pattern),
            _ => Decision::Unrestricted,
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        !self.is_disallowed(url)
    }

    pub fn is_disallowed(&self, url: &str) -> bool {
        matches!(self.decide(url), Decision::Disallow(_))
    }

    pub fn crawl_delay(&self) -> f64 {
        self.rules_for(&self.agent)
            .map_or(0.0, RuleSet::crawl_delay)
    }

    pub fn found_agents(&self) -> &'a [String] {
        self.robots.found_agents()
    }

    pub fn sitemaps(&self) -> &'a [String] {
        self.robots.sitemaps()
    }

}

/// Absolute URLs are reduced to path and query as the caller wrote them,
/// without the percent-encoding `Url` applies. Anything else is matched as written.
fn match_target(url: &str) -> Cow<'_, str> {
    if !Url::parse(url).is_ok_and(|parsed| parsed.has_host()) {
        return Cow::Borrowed(url);
    }
    let Some((_, after_scheme)) = url.split_once("://") else {
        return Cow::Borrowed(url);
    };
    let without_fragment = after_scheme.split('#').next().unwrap_or_default();
    match without_fragment.find(['/', '?']) {
        Some(start) if without_fragment[start..].starts_with('/') => {
            Cow::Borrowed(&without_fragment[start..])
        }
        Some(start) => Cow::Owned(format!("/{}", &without_fragment[start..])),
        None => Cow::Borrowed("/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decide(document: &str, url: &str) -> Option<(bool, String)> {
        let robots = RobotsTxt::parse(document);
        let matcher = robots.matcher("*");
        match matcher.decide(url) {
            Decision::Allow(p) => Some((true, p.as_str().to_owned())),
            Decision::Disallow(p) => Some((false, p.as_str().to_owned())),
            Decision::Unrestricted => None,
        }
    }

    #[test]
    fn longer_allow_beats_shorter_disallow() {
        assert_eq!(
            decide("allow: /p\ndisallow: /", "https://example.com/page"),
            Some((true, "/p".to_owned()))
        );
    }

    #[test]
    fn equal_specificity_resolves_to_allow() {
        assert_eq!(
            decide("allow: /folder\ndisallow: /folder", "https://example.com/folder/page"),
            Some((true, "/folder".to_owned()))
        );
        assert_eq!(
            decide("allow: /page\ndisallow: /*.ph", "/page.php5"),
            Some((true, "/page".to_owned()))
        );
    }

    #[test]
    fn wildcard_disallow_beats_shorter_allow() {
        assert_eq!(
            decide("allow: /page\ndisallow: /*.htm", "https://example.com/page.htm"),
            Some((false, "/*.htm".to_owned()))
        );
    }

    #[test]
    fn anchored_root_allow() {
        let document = "allow: /$\ndisallow: /";
        assert_eq!(
            decide(document, "https://example.com/"),
            Some((true, "/$".to_owned()))
        );
        assert_eq!(
            decide(document, "https://example.com/page.htm"),
            Some((false, "/".to_owned()))
        );
    }

    #[test]
    fn no_match_is_unrestricted() {
        assert_eq!(decide("disallow: /private", "/public"), None);
        assert_eq!(decide("", "/anything"), None);
    }

    #[test]
    fn best_match_prefers_first_on_tie() {
        let robots = RobotsTxt::parse("disallow: /a*\ndisallow: /*b\ndisallow: /");
        let matcher = robots.matcher("*");
        let best = matcher.best_match("/ab", RuleKind::Disallow).unwrap();
        assert_eq!(best.pattern.as_str(), "/a*");
        assert_eq!(best.specificity, 3);
    }

    #[test]
    fn matches_reports_both_kinds() {
        let robots = RobotsTxt::parse("disallow: /gp/\ndisallow: /*/gcrnsts\nallow: /gp/wishlist/ipad-install*");
        let report = robots.matcher("*").matches("/gp/wishlist/ipad-install/gcrnsts");
        let disallow: Vec<_> = report
            .disallow
            .iter()
            .map(|m| (m.pattern.as_str(), m.specificity))
            .collect();
        assert_eq!(disallow, [("/gp/", 4), ("/*/gcrnsts", 10)]);
        assert_eq!(report.allow.len(), 1);
        assert_eq!(report.allow[0].specificity, 26);
    }

    #[test]
    fn agent_can_be_switched_without_reparsing() {
        let robots = RobotsTxt::parse("User-agent: Curl\nDisallow: /url\nCrawl-delay: 4");
        let mut matcher = robots.matcher("*");
        assert_eq!(matcher.agent(), "*");
        assert!(matcher.is_allowed("/url"));
        assert_eq!(matcher.crawl_delay(), 0.0);

        matcher.set_agent("Curl");
        assert_eq!(matcher.agent(), "Curl");
        assert!(matcher.is_disallowed("/url"));
        assert_eq!(matcher.crawl_delay(), 4.0);
    }

    #[test]
    fn absolute_urls_match_on_path_and_query() {
        assert_eq!(match_target("https://example.com/a/b?x=1#frag"), "/a/b?x=1");
        assert_eq!(match_target("/relative?x"), "/relative?x");
        assert_eq!(match_target("not a url"), "not a url");
        assert_eq!(match_target("https://example.com"), "/");
        assert_eq!(match_target("https://example.com?x=1"), "/?x=1");
    }

    #[test]
    fn absolute_urls_keep_raw_path_text() {
        assert_eq!(match_target("https://example.com/café"), "/café");
        assert_eq!(match_target("https://example.com/a b?q=é"), "/a b?q=é");

        let robots = RobotsTxt::parse("Disallow: /café\nDisallow: /a b");
        let matcher = robots.matcher("*");
        for url in ["/café", "https://example.com/café", "/a b/c", "https://example.com/a b/c"] {
            assert!(matcher.is_disallowed(url), "expected {url} to be disallowed");
        }
        assert!(matcher.is_allowed("https://example.com/cafe"));
    }
}

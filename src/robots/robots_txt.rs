use crate::robots::robots_txt_matcher::RobotsTxtMatcher;
use crate::robots::robots_txt_parser::RobotsTxtParser;
use crate::robots::rule_set::RuleTable;
use url::Url;

/// A parsed robots.txt document. Immutable once built; queries go through
/// [`RobotsTxt::matcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct RobotsTxt {
    rules: RuleTable,
    sitemaps: Vec<String>,
}

impl RobotsTxt {
    /// Parses a document. Relative sitemap references are kept as written.
    pub fn parse(document: &str) -> Self {
        Self::from_parser(RobotsTxtParser::new(None), document)
    }

    /// Parses a document served by `site`, resolving relative sitemap references against it.
    pub fn parse_with_site(document: &str, site: &Url) -> Self {
        Self::from_parser(RobotsTxtParser::new(Some(site)), document)
    }

    fn from_parser(parser: RobotsTxtParser<'_>, document: &str) -> Self {
        let (rules, sitemaps) = parser.parse(document);
        Self { rules, sitemaps }
    }

    /// Parses `document` and checks a single URL for `agent`.
    pub fn allows(document: &str, agent: &str, url: &str) -> bool {
        Self::parse(document).matcher(agent).is_allowed(url)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Agents named by `User-agent` lines in first-seen order, always led by `*`.
    pub fn found_agents(&self) -> &[String] {
        self.rules.agents()
    }

    pub fn matcher(&self, agent: &str) -> RobotsTxtMatcher<'_> {
        RobotsTxtMatcher::new(self, agent)
    }
}

impl Default for RobotsTxt {
    fn default() -> Self {
        Self::parse("")
    }
}

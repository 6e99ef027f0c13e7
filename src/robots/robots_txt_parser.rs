use crate::robots::robots_txt_directive::RobotsTxtDirective;
use crate::robots::robots_txt_pattern::RobotsTxtPattern;
use crate::robots::rule_set::{DEFAULT_AGENT, RuleKind, RuleTable};
use tracing::debug;
use url::Url;

/// Whether the next `User-agent` line joins the current group or starts a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    FreshGroup,
    ContinuingGroup,
}

pub struct RobotsTxtParser<'a> {
    site: Option<&'a Url>,
    rules: RuleTable,
    sitemaps: Vec<String>,
    current_agents: Vec<String>,
    group_state: GroupState,
}

impl<'a> RobotsTxtParser<'a> {
    pub fn new(site: Option<&'a Url>) -> Self {
        Self {
            site,
            rules: RuleTable::new(),
            sitemaps: Vec::new(),
            current_agents: vec![DEFAULT_AGENT.to_owned()],
            group_state: GroupState::FreshGroup,
        }
    }

    pub fn parse(mut self, document: &str) -> (RuleTable, Vec<String>) {
        for line in document.lines() {
            match RobotsTxtDirective::parse(line) {
                Some(directive) => self.apply(directive),
                None => {
                    if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
                        debug!(line, "Skipping malformed robots.txt line");
                    }
                }
            }
        }
        debug!(
            agents = self.rules.agents().len(),
            sitemaps = self.sitemaps.len(),
            "Parsed robots.txt"
        );
        (self.rules, self.sitemaps)
    }

    fn apply(&mut self, directive: RobotsTxtDirective) {
        if !matches!(directive, RobotsTxtDirective::UserAgent(_)) {
            self.group_state = GroupState::FreshGroup;
        }
        match directive {
            RobotsTxtDirective::UserAgent(agent) => {
                match self.group_state {
                    GroupState::FreshGroup => {
                        self.current_agents = vec![agent];
                        self.group_state = GroupState::ContinuingGroup;
                    }
                    GroupState::ContinuingGroup => self.current_agents.push(agent),
                }
                for agent in &self.current_agents {
                    self.rules.ensure(agent);
                }
            }
            RobotsTxtDirective::Allow(value) => self.add_pattern(RuleKind::Allow, &value),
            RobotsTxtDirective::Disallow(value) => self.add_pattern(RuleKind::Disallow, &value),
            RobotsTxtDirective::CrawlDelay(Some(delay)) => {
                for agent in &self.current_agents {
                    self.rules.ensure(agent).set_crawl_delay(delay);
                }
            }
            RobotsTxtDirective::CrawlDelay(None) => {
                debug!("Ignoring invalid crawl-delay");
            }
            RobotsTxtDirective::Sitemap(value) => {
                let sitemap = self.resolve_sitemap(&value);
                if !self.sitemaps.contains(&sitemap) {
                    self.sitemaps.push(sitemap);
                }
            }
            RobotsTxtDirective::Other { key, value } => {
                for agent in &self.current_agents {
                    self.rules.ensure(agent).set_extension(&key, &value);
                }
            }
        }
    }

    fn add_pattern(&mut self, kind: RuleKind, value: &str) {
        let Some(pattern) = RobotsTxtPattern::new(value) else {
            return;
        };
        for agent in &self.current_agents {
            self.rules.ensure(agent).push_pattern(kind, pattern.clone());
        }
    }

    fn resolve_sitemap(&self, value: &str) -> String {
        if let Ok(url) = Url::parse(value) {
            if url.has_host() {
                return value.to_owned();
            }
        }
        match self.site {
            Some(site) => match site.join(value) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!(value, error = %e, "Keeping unresolvable sitemap as written");
                    value.to_owned()
                }
            },
            None => value.to_owned(),
        }
    }
}

use crate::robots::robots_txt_pattern::RobotsTxtPattern;
use std::collections::{BTreeMap, HashMap};

/// The wildcard agent every unnamed crawler falls back to.
pub const DEFAULT_AGENT: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Allow,
    Disallow,
}

/// The rules recorded for one agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    allow: Vec<RobotsTxtPattern>,
    disallow: Vec<RobotsTxtPattern>,
    crawl_delay: f64,
    extensions: BTreeMap<String, String>,
}

impl RuleSet {
    pub fn patterns(&self, kind: RuleKind) -> &[RobotsTxtPattern] {
        match kind {
            RuleKind::Allow => &self.allow,
            RuleKind::Disallow => &self.disallow,
        }
    }

    pub fn allow(&self) -> &[RobotsTxtPattern] {
        &self.allow
    }

    pub fn disallow(&self) -> &[RobotsTxtPattern] {
        &self.disallow
    }

    pub fn crawl_delay(&self) -> f64 {
        self.crawl_delay
    }

    /// Value of a directive this crate gives no meaning to, such as `host`.
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    pub(crate) fn push_pattern(&mut self, kind: RuleKind, pattern: RobotsTxtPattern) {
        match kind {
            RuleKind::Allow => self.allow.push(pattern),
            RuleKind::Disallow => self.disallow.push(pattern),
        }
    }

    pub(crate) fn set_crawl_delay(&mut self, crawl_delay: f64) {
        self.crawl_delay = crawl_delay;
    }

    pub(crate) fn set_extension(&mut self, key: &str, value: &str) {
        self.extensions.insert(key.to_owned(), value.to_owned());
    }
}

/// Agent name to [`RuleSet`], remembering the order agents were first seen.
/// Agent names are case-sensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    agents: Vec<String>,
    rules: HashMap<String, RuleSet>,
}

impl RuleTable {
    pub fn new() -> Self {
        let mut table = Self {
            agents: Vec::new(),
            rules: HashMap::new(),
        };
        table.ensure(DEFAULT_AGENT);
        table
    }

    pub fn get(&self, agent: &str) -> Option<&RuleSet> {
        self.rules.get(agent)
    }

    /// The agent's own rules, or the `*` rules when the agent was never named.
    pub fn rules_for(&self, agent: &str) -> Option<&RuleSet> {
        self.rules
            .get(agent)
            .or_else(|| self.rules.get(DEFAULT_AGENT))
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub(crate) fn ensure(&mut self, agent: &str) -> &mut RuleSet {
        if !self.rules.contains_key(agent) {
            self.agents.push(agent.to_owned());
        }
        self.rules.entry(agent.to_owned()).or_default()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

mod fetch_config;
mod robots_error;
mod robots_txt;
mod robots_txt_directive;
mod robots_txt_matcher;
mod robots_txt_parser;
mod robots_txt_pattern;
mod robots_txt_source;
mod rule_set;

pub use fetch_config::FetchConfig;
pub use robots_error::RobotsError;
pub use robots_txt::RobotsTxt;
pub use robots_txt_directive::RobotsTxtDirective;
pub use robots_txt_matcher::{Decision, MatchReport, PatternMatch, RobotsTxtMatcher};
pub use robots_txt_pattern::RobotsTxtPattern;
pub use robots_txt_source::{RobotsTxtSource, is_allowed, is_origin};
pub use rule_set::{DEFAULT_AGENT, RuleKind, RuleSet, RuleTable};

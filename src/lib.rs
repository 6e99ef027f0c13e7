//! Parsing of robots.txt documents and allow/disallow decisions for crawlers.
//!
//! ```
//! use rusty_robots::robots::RobotsTxt;
//!
//! let robots_txt = RobotsTxt::parse("User-agent: *\nAllow: /p\nDisallow: /");
//! let matcher = robots_txt.matcher("MyBot");
//! assert!(matcher.is_allowed("/page"));
//! assert!(matcher.is_disallowed("/other"));
//! ```

pub mod robots;

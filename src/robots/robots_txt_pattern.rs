use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    Wildcard,
    EndAnchor,
}

/// A path pattern from an `Allow` or `Disallow` line.
///
/// `*` matches any run of characters and `$` requires the end of the path.
/// Everything else is matched literally. Patterns are anchored at the start
/// of the path only, so a pattern without `$` is a prefix test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsTxtPattern {
    source: String,
    tokens: Vec<Token>,
}

impl RobotsTxtPattern {
    /// Compiles a raw pattern. Returns `None` for an empty pattern, which
    /// robots.txt treats as "no rule" rather than "match everything".
    pub fn new(source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }

        let mut tokens: Vec<Token> = Vec::new();
        for c in source.chars() {
            let token = match c {
                '*' => Token::Wildcard,
                '$' => Token::EndAnchor,
                _ => Token::Literal(c),
            };
            if token == Token::Wildcard && tokens.last() == Some(&Token::Wildcard) {
                continue;
            }
            tokens.push(token);
        }
        // Without an end anchor the pattern is a prefix test.
        if !tokens.contains(&Token::EndAnchor) && tokens.last() != Some(&Token::Wildcard) {
            tokens.push(Token::Wildcard);
        }

        Some(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Precedence of this pattern against competing ones. Every character
    /// of the raw pattern counts once, including `*` and `$`.
    pub fn specificity(&self) -> usize {
        self.source.chars().count()
    }

    /// Greedy glob match with a single backtrack point at the last wildcard.
    /// Runs in O(pattern × path) time.
    pub fn matches(&self, path: &str) -> bool {
        let text: Vec<char> = path.chars().collect();
        let tokens = &self.tokens;
        let (mut p, mut t) = (0, 0);
        let mut backtrack: Option<(usize, usize)> = None;

        loop {
            if p < tokens.len() {
                match tokens[p] {
                    Token::Wildcard => {
                        if p + 1 == tokens.len() {
                            return true;
                        }
                        backtrack = Some((p, t));
                        p += 1;
                        continue;
                    }
                    Token::EndAnchor if t == text.len() => {
                        p += 1;
                        continue;
                    }
                    Token::Literal(c) if t < text.len() && text[t] == c => {
                        p += 1;
                        t += 1;
                        continue;
                    }
                    _ => {}
                }
            } else if t == text.len() {
                return true;
            }

            match backtrack {
                Some((star, matched)) if matched < text.len() => {
                    backtrack = Some((star, matched + 1));
                    p = star + 1;
                    t = matched + 1;
                }
                _ => return false,
            }
        }
    }
}

impl fmt::Display for RobotsTxtPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

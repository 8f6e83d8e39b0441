//! Tokenizer for a single decompressed inventory line.
//!
//! Each entry has the shape
//! `<name> <domain>:<role> <priority> <location> <dispname>`, where the fields
//! are separated by runs of whitespace, `name` may itself contain whitespace,
//! and `dispname` runs to the end of the line.

/// One typed inventory entry, borrowing from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryRecord<'a> {
    pub name: &'a str,
    pub domain: &'a str,
    pub role: &'a str,
    /// Signed decimal integer, kept verbatim.
    pub priority: &'a str,
    pub location: &'a str,
    pub dispname: &'a str,
}

impl<'a> InventoryRecord<'a> {
    /// Parse a line, returning `None` if it does not follow the entry grammar.
    ///
    /// The name is the shortest prefix for which the remainder of the line
    /// parses, so names containing spaces are accepted.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_end();

        whitespace_runs(line)
            .filter(|&(start, _)| start > 0)
            .find_map(|(start, end)| Self::parse_tail(&line[..start], &line[end..]))
    }

    /// The full `domain:role` directive.
    pub fn directive(&self) -> String {
        format!("{}:{}", self.domain, self.role)
    }

    fn parse_tail(name: &'a str, tail: &'a str) -> Option<Self> {
        let (directive, tail) = next_token(tail)?;
        let (domain, role) = directive.split_once(':')?;

        let (priority, tail) = next_token(tail)?;
        if !is_signed_integer(priority) {
            return None;
        }

        // Callers trim the line, so a separator here implies a non-empty dispname.
        let (location, dispname) = next_token(tail)?;

        Some(Self {
            name,
            domain,
            role,
            priority,
            location,
            dispname,
        })
    }
}

/// Split off the next whitespace-free token and the remainder after the
/// separating whitespace. The token must be followed by whitespace.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let end = input.find(char::is_whitespace)?;
    if end == 0 {
        return None;
    }
    Some((&input[..end], input[end..].trim_start()))
}

fn is_signed_integer(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Byte ranges of every maximal whitespace run in `line`.
fn whitespace_runs(line: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut chars = line.char_indices().peekable();
    std::iter::from_fn(move || {
        let (start, _) = chars.by_ref().find(|(_, c)| c.is_whitespace())?;
        let mut end = line.len();
        while let Some(&(idx, c)) = chars.peek() {
            if !c.is_whitespace() {
                end = idx;
                break;
            }
            chars.next();
        }
        Some((start, end))
    })
}

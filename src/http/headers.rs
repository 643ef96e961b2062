use crate::http::parser::ParseError;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Non-alphanumeric characters allowed in a header name.
const TOKEN_SPECIALS: &[u8] = b"!#$%&'*+-.^_`|~";

/// A case-insensitive header multimap.
///
/// Names keep the spelling they were inserted with but are compared
/// ASCII-case-insensitively. Iteration follows insertion order. A second
/// value for an existing name is merged into the first as `"first, second"`
/// rather than replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a header value by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.entries[i].1.as_str())
    }

    /// Adds a value, merging with `", "` if the name is already present.
    pub fn append(&mut self, name: impl Into<String>, value: impl AsRef<str>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => {
                let existing = &mut self.entries[i].1;
                existing.push_str(", ");
                existing.push_str(value.as_ref());
            }
            None => self.entries.push((name, value.as_ref().to_string())),
        }
    }

    /// Adds or replaces a header.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parses a single CRLF-terminated header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the blank line ending
    /// the header block was reached. `Ok((0, false))` means no full line is
    /// buffered yet. On error nothing is consumed and the map is unchanged.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), ParseError> {
        let Some(idx) = find_crlf(data) else {
            return Ok((0, false));
        };

        let line = std::str::from_utf8(&data[..idx]).map_err(|_| ParseError::InvalidEncoding)?;
        if line.is_empty() {
            return Ok((CRLF.len(), true));
        }

        let (raw_name, value) = line.split_once(':').ok_or(ParseError::InvalidHeaderLine)?;

        // No whitespace allowed between the field name and the colon.
        if raw_name.is_empty() || raw_name.ends_with([' ', '\t']) {
            return Err(ParseError::InvalidHeaderName);
        }

        let name = raw_name.trim();
        if name.is_empty() || !name.bytes().all(is_token_char) {
            return Err(ParseError::InvalidHeaderName);
        }

        self.append(name.to_ascii_lowercase(), value.trim());

        Ok((idx + CRLF.len(), false))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

pub(crate) fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}

/// Header names are ASCII tokens; non-ASCII letters are rejected.
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_SPECIALS.contains(&b)
}

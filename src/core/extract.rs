use crate::domain::model::Record;
use regex::Regex;

/// Pulls the catalog out of a raw HTML document.
///
/// The document is expected to contain at most one `const games = [ ... ];`
/// assignment inside a script block. Only the first occurrence is read; a
/// missing or unterminated block yields an empty catalog, which is a normal
/// outcome rather than an error. Entries without a quoted `title` are dropped
/// silently, and missing or malformed fields degrade to their absent value
/// instead of failing the entry.
pub fn extract_catalog(source: &str) -> Vec<Record> {
    let marker = Regex::new(r"const\s+games\s*=\s*\[").expect("catalog marker pattern");
    let Some(found) = marker.find(source) else {
        return Vec::new();
    };

    // Hand the reader the slice starting at the opening bracket.
    let mut reader = Reader::new(&source[found.end() - 1..]);
    reader.parse_catalog().unwrap_or_default()
}

/// Fields gathered from one object literal before the required-title check.
#[derive(Default)]
struct EntryFields {
    title: Option<String>,
    platforms: Vec<String>,
    genre: Option<String>,
    rating: Option<f64>,
    price: Option<f64>,
}

impl EntryFields {
    fn into_record(self) -> Option<Record> {
        let title = self.title?;
        Some(Record {
            title: title.trim().to_string(),
            platforms: self.platforms,
            genre: self.genre.map(|g| g.trim().to_string()).unwrap_or_default(),
            rating: self.rating,
            price: self.price,
        })
    }
}

/// One parsed value inside an object literal.
enum Value {
    Str(String),
    Num(f64),
    List(Vec<String>),
    Other,
}

/// Minimal reader for the literal subset the catalog uses: arrays, objects,
/// single- or double-quoted strings and unsigned decimal numbers.
///
/// Unlike flat brace matching, the reader tracks nesting and string contents,
/// so braces or brackets inside a field value do not corrupt entry boundaries.
/// Every method that advances returns `None` when the input ends early; the
/// caller treats that as "no closing marker" and produces an empty catalog.
struct Reader<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Skips whitespace and `//` / `/* */` comments.
    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.bump();
            }
            let rest = &self.src.as_bytes()[self.pos..];
            if rest.starts_with(b"//") {
                while self.peek().is_some_and(|b| b != b'\n') {
                    self.bump();
                }
            } else if rest.starts_with(b"/*") {
                self.pos += 2;
                while self.pos < self.src.len() && !self.src.as_bytes()[self.pos..].starts_with(b"*/") {
                    self.bump();
                }
                self.pos = (self.pos + 2).min(self.src.len());
            } else {
                return;
            }
        }
    }

    fn parse_catalog(&mut self) -> Option<Vec<Record>> {
        debug_assert_eq!(self.peek(), Some(b'['));
        self.bump();

        let mut records = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek()? {
                b']' => {
                    self.bump();
                    return Some(records);
                }
                b',' => self.bump(),
                b'{' => {
                    if let Some(record) = self.parse_entry()?.into_record() {
                        records.push(record);
                    }
                }
                _ => self.skip_value()?,
            }
        }
    }

    fn parse_entry(&mut self) -> Option<EntryFields> {
        debug_assert_eq!(self.peek(), Some(b'{'));
        self.bump();

        let mut fields = EntryFields::default();
        loop {
            self.skip_trivia();
            match self.peek()? {
                b'}' => {
                    self.bump();
                    return Some(fields);
                }
                b',' => self.bump(),
                _ => {
                    let key = self.parse_key()?;
                    self.skip_trivia();
                    if self.peek()? != b':' {
                        // Stray token, not a key-value pair. Drop it and move on.
                        continue;
                    }
                    self.bump();
                    self.skip_trivia();
                    let value = self.parse_value()?;
                    // First occurrence of a duplicated key wins.
                    match key.as_str() {
                        "title" => {
                            if fields.title.is_none() {
                                if let Value::Str(s) = value {
                                    fields.title = Some(s);
                                }
                            }
                        }
                        "platforms" => {
                            if fields.platforms.is_empty() {
                                if let Value::List(items) = value {
                                    fields.platforms = items;
                                }
                            }
                        }
                        "genre" => {
                            if fields.genre.is_none() {
                                if let Value::Str(s) = value {
                                    fields.genre = Some(s);
                                }
                            }
                        }
                        "rating" => {
                            if fields.rating.is_none() {
                                if let Value::Num(n) = value {
                                    fields.rating = Some(n);
                                }
                            }
                        }
                        "price" => {
                            if fields.price.is_none() {
                                if let Value::Num(n) = value {
                                    fields.price = Some(n);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    /// Object key: a quoted string or a bare identifier. Guarantees progress
    /// even on unexpected input.
    fn parse_key(&mut self) -> Option<String> {
        match self.peek()? {
            b'"' | b'\'' => self.parse_string(),
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
                {
                    self.bump();
                }
                if self.pos == start {
                    self.bump();
                }
                Some(self.src[start..self.pos].to_string())
            }
        }
    }

    fn parse_value(&mut self) -> Option<Value> {
        match self.peek()? {
            b'"' | b'\'' => Some(Value::Str(self.parse_string()?)),
            b'[' => Some(Value::List(self.parse_string_list()?)),
            b'{' => {
                self.skip_balanced(b'{', b'}')?;
                Some(Value::Other)
            }
            b if b.is_ascii_digit() || b == b'.' => Some(self.parse_number()?),
            _ => {
                self.skip_value()?;
                Some(Value::Other)
            }
        }
    }

    /// Quoted string; the backslash escapes the next character literally.
    fn parse_string(&mut self) -> Option<String> {
        let quote = self.peek()?;
        self.bump();

        let mut out = String::new();
        loop {
            let start = self.pos;
            while self
                .peek()
                .is_some_and(|b| b != quote && b != b'\\')
            {
                self.bump();
            }
            out.push_str(&self.src[start..self.pos]);
            match self.peek()? {
                b'\\' => {
                    self.bump();
                    let escaped_start = self.pos;
                    self.peek()?;
                    self.bump();
                    // Re-align to the next char boundary for multibyte input.
                    while self.pos < self.src.len() && !self.src.is_char_boundary(self.pos) {
                        self.bump();
                    }
                    out.push_str(&self.src[escaped_start..self.pos]);
                }
                _ => {
                    self.bump();
                    return Some(out);
                }
            }
        }
    }

    /// All quoted strings inside a bracketed list, in order, at any depth.
    fn parse_string_list(&mut self) -> Option<Vec<String>> {
        debug_assert_eq!(self.peek(), Some(b'['));
        self.bump();

        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek()? {
                b']' => {
                    self.bump();
                    return Some(items);
                }
                b',' => self.bump(),
                b'"' | b'\'' => items.push(self.parse_string()?),
                b'[' => items.extend(self.parse_string_list()?),
                b'{' => self.skip_balanced(b'{', b'}')?,
                _ => self.skip_value()?,
            }
        }
    }

    /// Digits with an optional decimal point. Anything that fails to parse as
    /// a float is treated as absent.
    fn parse_number(&mut self) -> Option<Value> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit() || b == b'.') {
            self.bump();
        }
        Some(match self.src[start..self.pos].parse::<f64>() {
            Ok(n) => Value::Num(n),
            Err(_) => Value::Other,
        })
    }

    /// Consumes one value of any shape without interpreting it.
    fn skip_value(&mut self) -> Option<()> {
        match self.peek()? {
            b'"' | b'\'' => {
                self.parse_string()?;
            }
            b'[' => self.skip_balanced(b'[', b']')?,
            b'{' => self.skip_balanced(b'{', b'}')?,
            _ => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|b| !b.is_ascii_whitespace() && !matches!(b, b',' | b'}' | b']' | b':'))
                {
                    self.bump();
                }
                if self.pos == start {
                    self.bump();
                }
            }
        }
        Some(())
    }

    /// Skips a balanced bracket pair, string- and comment-aware.
    fn skip_balanced(&mut self, open: u8, close: u8) -> Option<()> {
        debug_assert_eq!(self.peek(), Some(open));
        self.bump();

        let mut depth = 1usize;
        loop {
            self.skip_trivia();
            match self.peek()? {
                b'"' | b'\'' => {
                    self.parse_string()?;
                }
                b if b == open => {
                    depth += 1;
                    self.bump();
                }
                b if b == close => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        return Some(());
                    }
                }
                _ => self.bump(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_block_returns_empty_catalog() {
        let source = "<html><body><p>No script here.</p></body></html>";
        assert!(extract_catalog(source).is_empty());
    }

    #[test]
    fn test_basic_extraction() {
        let source = r#"
            <script>
            const games = [
                { title: "Alpha Quest", platforms: ["PC", "Mac"], genre: "RPG", rating: 4.5, price: 0 },
                { title: "Beta Racer", platforms: ["PC"], genre: "Racing", rating: 3.0, price: 9.99 },
            ];
            </script>
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "Alpha Quest");
        assert_eq!(records[0].platforms, vec!["PC", "Mac"]);
        assert_eq!(records[0].genre, "RPG");
        assert_eq!(records[0].rating, Some(4.5));
        assert_eq!(records[0].price, Some(0.0));

        assert_eq!(records[1].title, "Beta Racer");
        assert_eq!(records[1].price, Some(9.99));
    }

    #[test]
    fn test_entry_without_title_is_dropped() {
        let source = r#"
            const games = [
                { platforms: ["PC"], genre: "RPG", rating: 4.0 },
                { title: "Kept", genre: "Puzzle" },
            ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
    }

    #[test]
    fn test_missing_fields_degrade_to_absent() {
        let source = r#"const games = [ { title: "Sparse" } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 1);
        assert!(records[0].platforms.is_empty());
        assert_eq!(records[0].genre, "");
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].price, None);
    }

    #[test]
    fn test_field_order_is_irrelevant() {
        let source = r#"
            const games = [
                { price: 19.99, genre: "Strategy", title: "Reordered", rating: 4.1, platforms: ["PC"] },
            ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records[0].title, "Reordered");
        assert_eq!(records[0].price, Some(19.99));
        assert_eq!(records[0].rating, Some(4.1));
    }

    #[test]
    fn test_title_and_genre_are_trimmed() {
        let source = r#"const games = [ { title: "  Padded  ", genre: " RPG " } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].title, "Padded");
        assert_eq!(records[0].genre, "RPG");
    }

    #[test]
    fn test_nested_braces_inside_values_do_not_break_boundaries() {
        // Flat brace matching would split these entries mid-value.
        let source = r#"
            const games = [
                { title: "Curly {Beta}", notes: { state: "beta", tags: ["x", "y"] }, rating: 4.0 },
                { title: "Second", platforms: ["PC", ["Steam", "GOG"]], price: 5.0 },
            ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Curly {Beta}");
        assert_eq!(records[0].rating, Some(4.0));
        assert_eq!(records[1].platforms, vec!["PC", "Steam", "GOG"]);
    }

    #[test]
    fn test_unterminated_block_yields_empty_catalog() {
        let source = r#"const games = [ { title: "Lost""#;
        assert!(extract_catalog(source).is_empty());
    }

    #[test]
    fn test_only_first_block_is_read() {
        let source = r#"
            const games = [ { title: "First" } ];
            const games = [ { title: "Second" } ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "First");
    }

    #[test]
    fn test_duplicate_platforms_within_record_are_preserved() {
        let source = r#"const games = [ { title: "Twice", platforms: ["PC", "PC"] } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].platforms, vec!["PC", "PC"]);
    }

    #[test]
    fn test_comments_and_trailing_commas_are_tolerated() {
        let source = r#"
            const games = [
                // first entry
                { title: "Annotated", rating: 4.2, },
                /* block
                   comment */
                { title: "Plain" },
            ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rating, Some(4.2));
    }

    #[test]
    fn test_non_numeric_rating_is_absent_not_zero() {
        let source = r#"const games = [ { title: "Odd", rating: "high", price: 1.2.3 } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].price, None);
    }

    #[test]
    fn test_single_quoted_strings_are_accepted() {
        let source = r#"const games = [ { title: 'Solo', platforms: ['PC'] } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].title, "Solo");
        assert_eq!(records[0].platforms, vec!["PC"]);
    }

    #[test]
    fn test_escaped_quote_inside_title() {
        let source = r#"const games = [ { title: "The \"Big\" One" } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].title, r#"The "Big" One"#);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let source = r#"
            const games = [
                { title: "Extra", publisher: "Someone", dlc: true, rating: 3.9 },
            ];
        "#;

        let records = extract_catalog(source);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, Some(3.9));
    }

    #[test]
    fn test_first_occurrence_of_duplicate_key_wins() {
        let source = r#"const games = [ { title: "One", title: "Two" } ];"#;

        let records = extract_catalog(source);
        assert_eq!(records[0].title, "One");
    }
}

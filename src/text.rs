// text.rs — string utilities: case conversion, truncation, wrapping, slugs.
//
// Case conversion is acronym-aware: "HTTPServer" splits as ["HTTP", "Server"],
// not ["H", "T", "T", "P", "Server"].

/// Split an identifier into lowercase words.
///
/// Handles `snake_case`, `kebab-case`, `camelCase`, `PascalCase`, spaces,
/// and runs of uppercase letters followed by a lowercase letter
/// (`"HTTPServer"` → `["http", "server"]`).
fn split_words(s: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev_upper = chars[i - 1].is_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            // Boundary before an uppercase letter when the previous char was
            // lowercase, or when an acronym run ends ("HTTPServer" → HTTP|Server).
            if !prev_upper || next_lower {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `"HTTPServer"` → `"http_server"`, `"fooBar"` → `"foo_bar"`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// `"foo_bar"` → `"foo-bar"`, `"HTTPServer"` → `"http-server"`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `"foo_bar"` → `"FooBar"`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| capitalize(w))
        .collect::<Vec<_>>()
        .join("")
}

/// `"foo_bar"` → `"fooBar"`.
pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, w) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(w);
        } else {
            out.push_str(&capitalize(w));
        }
    }
    out
}

fn capitalize(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Truncate to at most `max` characters, appending `…` when anything was cut.
///
/// `max` counts chars, not bytes, so multi-byte text never splits mid-char.
/// `max == 0` returns the empty string.
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let cut: String = s.chars().take(max - 1).collect();
    format!("{cut}…")
}

/// Word-wrap `s` to lines of at most `width` chars.
///
/// Words longer than `width` are hard-broken. Existing newlines are
/// paragraph breaks and preserved.
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in s.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if word_len > width {
                // Hard-break an oversized word across lines.
                let mut rest: Vec<char> = word.chars().collect();
                if line_len > 0 {
                    line.push(' ');
                    line_len += 1;
                }
                while !rest.is_empty() {
                    let take = (width - line_len).min(rest.len());
                    line.extend(rest.drain(..take));
                    line_len += take;
                    if !rest.is_empty() {
                        lines.push(std::mem::take(&mut line));
                        line_len = 0;
                    }
                }
                continue;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }
        lines.push(line);
    }
    lines
}

/// Lowercase ASCII slug: alphanumerics kept, everything else collapses to
/// a single `-`. `"Hello, World!"` → `"hello-world"`.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_basic() {
        assert_eq!(to_snake_case("fooBar"), "foo_bar");
        assert_eq!(to_snake_case("FooBar"), "foo_bar");
        assert_eq!(to_snake_case("foo_bar"), "foo_bar");
        assert_eq!(to_snake_case("foo-bar baz"), "foo_bar_baz");
    }

    #[test]
    fn snake_case_acronyms() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("parseXMLDocument"), "parse_xml_document");
        assert_eq!(to_snake_case("ID"), "id");
    }

    #[test]
    fn camel_and_pascal() {
        assert_eq!(to_camel_case("foo_bar_baz"), "fooBarBaz");
        assert_eq!(to_pascal_case("foo_bar"), "FooBar");
        assert_eq!(to_kebab_case("FooBar"), "foo-bar");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 6), "hello…");
        assert_eq!(truncate_chars("héllo wörld", 6), "héllo…");
        assert_eq!(truncate_chars("hello", 0), "");
    }

    #[test]
    fn wrap_basic() {
        let lines = wrap("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        let lines = wrap("abcdefghijkl", 5);
        assert_eq!(lines, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn wrap_preserves_paragraphs() {
        let lines = wrap("one\ntwo three", 20);
        assert_eq!(lines, vec!["one", "two three"]);
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  --a  b--  "), "a-b");
        assert_eq!(slugify("!!!"), "");
    }
}

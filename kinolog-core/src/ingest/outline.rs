//! Line-level parsing of the outline document.
//!
//! A headline is one or more `*` followed by whitespace and the title text.
//! Directly below it an optional `:PROPERTIES:` ... `:END:` drawer carries
//! `:KEY: value` lines. Everything else (notes, blank lines) is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{IngestError, Result};

static PROPERTY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:([A-Za-z_][A-Za-z0-9_]*):(?:\s+(.*))?$").expect("property regex")
});

/// One raw outline entry before any field typing.
#[derive(Debug, Clone)]
pub(crate) struct OutlineEntry {
    /// 1-based line number of the headline, for error reporting.
    pub line: usize,
    /// Raw headline text after the stars, untrimmed of inline metadata.
    pub headline: String,
    /// Drawer properties in document order; keys lowercased, values trimmed.
    pub properties: Vec<(String, String)>,
}

/// Split the document into entries. Structural problems (an unclosed or
/// garbled drawer) fail the whole parse.
pub(crate) fn parse_outline(text: &str) -> Result<Vec<OutlineEntry>> {
    let mut entries: Vec<OutlineEntry> = Vec::new();
    let mut lines = text.lines().enumerate().peekable();

    while let Some((idx, line)) = lines.next() {
        let Some(headline) = headline_text(line) else {
            continue;
        };
        let mut entry = OutlineEntry {
            line: idx + 1,
            headline: headline.to_string(),
            properties: Vec::new(),
        };

        let has_drawer = lines
            .peek()
            .is_some_and(|(_, next)| next.trim() == ":PROPERTIES:");
        if has_drawer {
            lines.next();
            let mut closed = false;
            for (prop_idx, prop_line) in lines.by_ref() {
                let trimmed = prop_line.trim();
                if trimmed == ":END:" {
                    closed = true;
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let Some(caps) = PROPERTY_LINE.captures(trimmed) else {
                    return Err(IngestError::Malformed {
                        line: prop_idx + 1,
                        reason: format!(
                            "expected `:KEY: value` inside properties drawer, got {trimmed:?}"
                        ),
                    });
                };
                let key = caps[1].to_ascii_lowercase();
                let value = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
                entry.properties.push((key, value.to_string()));
            }
            if !closed {
                return Err(IngestError::Malformed {
                    line: entry.line,
                    reason: format!(
                        "properties drawer of {:?} not closed before end of document",
                        entry.headline
                    ),
                });
            }
        }

        entries.push(entry);
    }

    Ok(entries)
}

fn headline_text(line: &str) -> Option<&str> {
    let stars = line.bytes().take_while(|b| *b == b'*').count();
    if stars == 0 {
        return None;
    }
    let rest = &line[stars..];
    if rest.starts_with(' ') || rest.starts_with('\t') {
        Some(rest.trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headlines_and_drawers() {
        let doc = "\
* Der dritte Mann (1949)
:PROPERTIES:
:YEAR: 1949
:GENRES: Thriller, Film Noir
:END:
Some free-form notes below the drawer.

** Nested headline without drawer
";
        let entries = parse_outline(doc).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].headline, "Der dritte Mann (1949)");
        assert_eq!(
            entries[0].properties,
            vec![
                ("year".to_string(), "1949".to_string()),
                ("genres".to_string(), "Thriller, Film Noir".to_string()),
            ]
        );
        assert!(entries[1].properties.is_empty());
    }

    #[test]
    fn drawer_must_be_closed() {
        let doc = "* Titel\n:PROPERTIES:\n:YEAR: 2001\n";
        let err = parse_outline(doc).unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 1, .. }));
    }

    #[test]
    fn garbled_drawer_line_is_structural() {
        let doc = "* Titel\n:PROPERTIES:\nnot a property\n:END:\n";
        assert!(matches!(
            parse_outline(doc),
            Err(IngestError::Malformed { line: 3, .. })
        ));
    }

    #[test]
    fn value_less_property_is_kept_as_blank() {
        let doc = "* Titel\n:PROPERTIES:\n:DIRECTOR:\n:END:\n";
        let entries = parse_outline(doc).unwrap();
        assert_eq!(
            entries[0].properties,
            vec![("director".to_string(), String::new())]
        );
    }

    #[test]
    fn bullet_without_space_is_not_a_headline() {
        let entries = parse_outline("*bold text* is body, not a headline\n").unwrap();
        assert!(entries.is_empty());
    }
}

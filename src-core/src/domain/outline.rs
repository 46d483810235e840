//! Document Outline
//!
//! Table of contents from wiki headings:
//! - `== Title ==` is a level-1 heading
//! - `=== Title ===` is a level-2 heading nested under the preceding level 1

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

static H1: OnceLock<Regex> = OnceLock::new();
static H2: OnceLock<Regex> = OnceLock::new();

fn h1() -> &'static Regex {
    H1.get_or_init(|| Regex::new(r"^==\s*(.+?)\s*==$").expect("valid heading pattern"))
}

fn h2() -> &'static Regex {
    H2.get_or_init(|| Regex::new(r"^===\s*(.+?)\s*===$").expect("valid heading pattern"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub level: u8,
    /// Dotted number, e.g. "2" or "2.1"
    pub number: String,
    /// 0-based line index of the heading
    pub line: usize,
    pub children: Vec<Section>,
}

/// Build the outline of `content`.
///
/// Level-2 headings before the first level-1 heading are ignored.
pub fn outline(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim_end();
        // `=== x ===` also matches the level-1 pattern
        if let Some(caps) = h2().captures(line) {
            if let Some(parent) = sections.last_mut() {
                let number = format!("{}.{}", parent.number, parent.children.len() + 1);
                parent.children.push(Section {
                    title: caps[1].trim().to_string(),
                    level: 2,
                    number,
                    line: index,
                    children: Vec::new(),
                });
            }
        } else if let Some(caps) = h1().captures(line) {
            sections.push(Section {
                title: caps[1].trim().to_string(),
                level: 1,
                number: (sections.len() + 1).to_string(),
                line: index,
                children: Vec::new(),
            });
        }
    }

    sections
}

/// Depth-first flattening, for table-of-contents lists
pub fn flatten(sections: &[Section]) -> Vec<&Section> {
    let mut out = Vec::new();
    for section in sections {
        out.push(section);
        out.extend(flatten(&section.children));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "intro\n=== orphan ===\n== Setup ==\ntext\n=== Install ===\n=== Configure ===\n== Usage ==\n=== CLI ===";

    #[test]
    fn test_outline_numbering() {
        let sections = outline(DOC);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Setup");
        assert_eq!(sections[0].line, 2);
        assert_eq!(sections[0].children[1].number, "1.2");
        assert_eq!(sections[0].children[1].title, "Configure");
        assert_eq!(sections[1].number, "2");
        assert_eq!(sections[1].children[0].number, "2.1");
    }

    #[test]
    fn test_flatten_order() {
        let sections = outline(DOC);
        let titles: Vec<&str> = flatten(&sections).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Setup", "Install", "Configure", "Usage", "CLI"]);
    }

    #[test]
    fn test_no_headings() {
        assert!(outline("just text\n== not closed").is_empty());
    }
}

use std::fmt;

/// Keywords that shape file structure rather than page content
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "obj",
    "endobj",
    "stream",
    "endstream",
    "R",
    "xref",
    "trailer",
    "startxref",
];

/// A bare keyword: structural (`obj`, `R`, …) or a content operator (`Tj`, `BT`, …)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperatorToken(String);

impl OperatorToken {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self(keyword.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_structural(&self) -> bool {
        STRUCTURAL_KEYWORDS.contains(&self.0.as_str())
    }

    pub fn is_reference_marker(&self) -> bool {
        self.0 == "R"
    }
}

impl fmt::Display for OperatorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Indirect object reference (e.g., `12 0 R`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndirectReference {
    pub object_number: u32,
    pub generation: u16,
}

impl IndirectReference {
    pub fn new(object_number: u32, generation: u16) -> Self {
        Self {
            object_number,
            generation,
        }
    }
}

impl fmt::Display for IndirectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.object_number, self.generation)
    }
}

/// Comment text after `%`, up to the end of the line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentToken(String);

impl CommentToken {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_keywords() {
        assert!(OperatorToken::new("endobj").is_structural());
        assert!(OperatorToken::new("R").is_reference_marker());
        assert!(!OperatorToken::new("Tj").is_structural());
        assert!(!OperatorToken::new("r").is_reference_marker());
    }

    #[test]
    fn test_reference_display() {
        assert_eq!(IndirectReference::new(12, 0).to_string(), "12 0 R");
    }

    #[test]
    fn test_comment_display() {
        assert_eq!(CommentToken::new("PDF-1.7").to_string(), "%PDF-1.7");
    }
}

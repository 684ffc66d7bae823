use serde::Serialize;

/// Leading marker of an outline line.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Dash,
    Numeric,
    None,
}

/// A raw outline line after trimming and marker stripping.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutlineLine {
    pub marker: Marker,
    /// Content with the marker removed and surrounding whitespace trimmed.
    /// For section headers this still includes the trailing colon.
    pub content: String,
    pub is_section: bool,
}

impl OutlineLine {
    /// Classify a raw line. Returns `None` for lines that are blank after trimming.
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw.trim();
        let first = line.chars().next()?;

        let (marker, content) = match first {
            '-' => (Marker::Dash, line[1..].trim()),
            c if c.is_ascii_digit() => (Marker::Numeric, line[1..].trim()),
            _ => (Marker::None, line),
        };

        Some(Self {
            marker,
            content: content.to_string(),
            is_section: content.ends_with(':'),
        })
    }

    /// Content without the trailing section colon.
    pub fn name(&self) -> &str {
        if self.is_section {
            &self.content[..self.content.len() - 1]
        } else {
            &self.content
        }
    }
}

/// A first-level outline entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// Directory name, `{root}.{name}`.
    pub folder: String,
}

/// A second-level outline entry. `section` is the owning section's folder name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeafItem {
    pub name: String,
    pub section: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OutlineAction {
    CreateSection(Section),
    EmitLeaf(LeafItem),
}

/// Template used to scaffold a leaf project.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTemplate {
    WebApi,
    ClassLibrary,
}

impl ProjectTemplate {
    /// Pick the template from the project name's suffix.
    pub fn for_project(name: &str, api_suffix: &str) -> Self {
        if name.ends_with(api_suffix) {
            Self::WebApi
        } else {
            Self::ClassLibrary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebApi => "webapi",
            Self::ClassLibrary => "classlib",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert!(OutlineLine::parse("").is_none());
        assert!(OutlineLine::parse("   \t ").is_none());
    }

    #[test]
    fn test_dash_section() {
        let line = OutlineLine::parse("  - Services:  ").unwrap();
        assert_eq!(line.marker, Marker::Dash);
        assert_eq!(line.content, "Services:");
        assert!(line.is_section);
        assert_eq!(line.name(), "Services");
    }

    #[test]
    fn test_numeric_marker_strips_one_char() {
        let line = OutlineLine::parse("1 Billing:").unwrap();
        assert_eq!(line.marker, Marker::Numeric);
        assert_eq!(line.name(), "Billing");

        // Only the first digit goes; the rest is kept literally.
        let line = OutlineLine::parse("12 Billing").unwrap();
        assert_eq!(line.content, "2 Billing");
    }

    #[test]
    fn test_unmarked_leaf() {
        let line = OutlineLine::parse("Orders.API").unwrap();
        assert_eq!(line.marker, Marker::None);
        assert!(!line.is_section);
        assert_eq!(line.name(), "Orders.API");
    }

    #[test]
    fn test_bare_marker_is_empty() {
        let line = OutlineLine::parse("-").unwrap();
        assert_eq!(line.content, "");
    }

    #[test]
    fn test_template_suffix() {
        assert_eq!(
            ProjectTemplate::for_project("App.Users.API", ".API"),
            ProjectTemplate::WebApi
        );
        assert_eq!(
            ProjectTemplate::for_project("App.Users.Api", ".API"),
            ProjectTemplate::ClassLibrary
        );
    }
}

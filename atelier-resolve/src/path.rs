use atelier_model::BindingKind;

/// A parsed property path.
///
/// The first dot-separated segment selects the section: `content`,
/// `style.<property>` or `bindings.<BINDING_KIND>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath {
    Content,
    Style(String),
    Binding(BindingKind),
}

impl PropertyPath {
    /// Parses a path; unknown sections and malformed paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let (section, rest) = match path.split_once('.') {
            Some((section, rest)) => (section, Some(rest)),
            None => (path, None),
        };
        match (section, rest) {
            ("content", None) => Some(PropertyPath::Content),
            ("style", Some(property)) if !property.is_empty() => {
                Some(PropertyPath::Style(property.to_owned()))
            }
            ("bindings", Some(kind)) => kind.parse().ok().map(PropertyPath::Binding),
            _ => None,
        }
    }
}

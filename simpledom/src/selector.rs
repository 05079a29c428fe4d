use crate::error::SelectorError;
use crate::node::Node;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.a` or a compound `.a.b`
    Classes(Vec<String>),
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }
        let unsupported = || SelectorError::Unsupported(input.to_string());

        if input.chars().any(char::is_whitespace) {
            return Err(unsupported());
        }

        if let Some(id) = input.strip_prefix('#') {
            if id.is_empty() || id.contains(['#', '.']) {
                return Err(unsupported());
            }
            return Ok(Selector::Id(id.to_string()));
        }

        if let Some(rest) = input.strip_prefix('.') {
            let classes: Vec<String> = rest.split('.').map(str::to_string).collect();
            if classes.iter().any(|c| c.is_empty() || c.contains('#')) {
                return Err(unsupported());
            }
            return Ok(Selector::Classes(classes));
        }

        Err(unsupported())
    }

    pub(crate) fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Selector::Classes(classes) => classes.iter().all(|c| node.classes.contains(c)),
        }
    }
}

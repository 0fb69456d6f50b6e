//! Stackable text decoration with a fixed nesting order.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::content::ContentSource;
use crate::domain::error::{DomainError, TreeResult};

/// Named text transformation with fixed markup.
///
/// Declaration order is the canonical order: a kind declared earlier always
/// wraps the kinds declared after it, so Bold is outermost and Underline innermost.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DecoratorKind {
    Bold,
    Italic,
    Underline,
}

impl DecoratorKind {
    pub const ALL: [DecoratorKind; 3] = [
        DecoratorKind::Bold,
        DecoratorKind::Italic,
        DecoratorKind::Underline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DecoratorKind::Bold => "bold",
            DecoratorKind::Italic => "italic",
            DecoratorKind::Underline => "underline",
        }
    }

    /// Opening and closing tag.
    pub fn markup(self) -> (&'static str, &'static str) {
        match self {
            DecoratorKind::Bold => ("<b>", "</b>"),
            DecoratorKind::Italic => ("<i>", "</i>"),
            DecoratorKind::Underline => ("<u>", "</u>"),
        }
    }

    pub fn wrap(self, value: &str) -> String {
        let (open, close) = self.markup();
        format!("{open}{value}{close}")
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DecoratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(DecoratorKind::Bold),
            "italic" | "i" => Ok(DecoratorKind::Italic),
            "underline" | "u" => Ok(DecoratorKind::Underline),
            _ => Err(DomainError::UnknownDecoratorKind(s.to_string())),
        }
    }
}

/// Set of active decorators over a set of registered ones.
///
/// Rendering depends only on which kinds are active, never on the order in
/// which they were toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorChain {
    registered: BTreeSet<DecoratorKind>,
    active: BTreeSet<DecoratorKind>,
}

impl Default for DecoratorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoratorChain {
    /// Chain accepting every known kind, nothing active.
    pub fn new() -> Self {
        Self::with_registered(DecoratorKind::ALL)
    }

    /// Chain accepting only `kinds`.
    pub fn with_registered(kinds: impl IntoIterator<Item = DecoratorKind>) -> Self {
        Self {
            registered: kinds.into_iter().collect(),
            active: BTreeSet::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn set_decorator(&mut self, kind: DecoratorKind, enabled: bool) -> TreeResult<()> {
        if !self.registered.contains(&kind) {
            return Err(DomainError::UnknownDecoratorKind(kind.name().to_string()));
        }
        let changed = if enabled {
            self.active.insert(kind)
        } else {
            self.active.remove(&kind)
        };
        debug!(%kind, enabled, changed, "set decorator");
        Ok(())
    }

    pub fn set_decorator_by_name(&mut self, name: &str, enabled: bool) -> TreeResult<()> {
        let kind = name.parse::<DecoratorKind>()?;
        self.set_decorator(kind, enabled)
    }

    pub fn is_active(&self, kind: DecoratorKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn is_registered(&self, kind: DecoratorKind) -> bool {
        self.registered.contains(&kind)
    }

    /// Active kinds, outermost first.
    pub fn active_kinds(&self) -> Vec<DecoratorKind> {
        self.active.iter().copied().collect()
    }

    pub fn registered_kinds(&self) -> Vec<DecoratorKind> {
        self.registered.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Wraps the source text innermost-first, i.e. in reverse canonical order.
    /// The source is never modified.
    #[instrument(level = "trace", skip_all)]
    pub fn render(&self, source: &ContentSource) -> String {
        self.active
            .iter()
            .rev()
            .fold(source.text().to_string(), |value, kind| kind.wrap(&value))
    }
}

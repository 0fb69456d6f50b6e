//! Text decoration service
//!
//! Owns a content source and its decorator chain for one session.

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{ContentSource, DecoratorChain, DecoratorKind};

/// Session object pairing a [`ContentSource`] with its [`DecoratorChain`].
#[derive(Debug, Clone, Default)]
pub struct TextService {
    source: ContentSource,
    chain: DecoratorChain,
}

impl TextService {
    /// Create a service whose chain accepts only `registered` kinds.
    pub fn new(registered: impl IntoIterator<Item = DecoratorKind>) -> Self {
        Self {
            source: ContentSource::default(),
            chain: DecoratorChain::with_registered(registered),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.source.set_text(text);
    }

    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn set_decorator(&mut self, kind: DecoratorKind, enabled: bool) -> ApplicationResult<()> {
        Ok(self.chain.set_decorator(kind, enabled)?)
    }

    /// Enable decorators by name. Names are validated up front so a bad
    /// entry leaves the chain untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn enable_all(&mut self, names: &[String]) -> ApplicationResult<()> {
        let mut staged = self.chain.clone();
        for name in names {
            staged.set_decorator_by_name(name, true)?;
        }
        self.chain = staged;
        debug!("active decorators: {:?}", self.chain.active_kinds());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.chain.clear();
    }

    pub fn chain(&self) -> &DecoratorChain {
        &self.chain
    }

    pub fn render(&self) -> String {
        self.chain.render(&self.source)
    }
}

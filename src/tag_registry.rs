//! The webtag symbol table: several hundred names bound to resolvers,
//! built once at startup.

use crate::render_context::RenderContext;
use crate::tag_params::TagParams;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

pub type Resolver = Box<dyn Fn(&TagParams, &RenderContext) -> String + Send + Sync>;

pub struct TagRegistry {
    tags: HashMap<String, Resolver>,
}

impl TagRegistry {
    /// Build the full registry. Rebuilding from scratch is always safe; the
    /// backing map is created fresh on every call.
    pub fn new() -> Self {
        let mut ret = Self {
            tags: HashMap::new(),
        };
        crate::tags_current::register(&mut ret);
        crate::tags_records::register(&mut ret);
        crate::tags_recent::register(&mut ret);
        crate::tags_misc::register(&mut ret);
        ret
    }

    /// Register one resolver. Registering the same name twice is a
    /// programming error, not a runtime condition.
    pub fn register<F>(&mut self, name: impl Into<String>, resolver: F)
    where
        F: Fn(&TagParams, &RenderContext) -> String + Send + Sync + 'static,
    {
        let name = name.into();
        let previous = self.tags.insert(name.clone(), Box::new(resolver));
        debug_assert!(previous.is_none(), "duplicate webtag registration: {name}");
    }

    pub fn resolve(&self, name: &str) -> Option<&Resolver> {
        self.tags.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tags.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Diagnostic dump of every registered tag name, one per line.
    pub fn write_tag_list<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = String::new();
        for name in self.names() {
            out.push_str(name);
            out.push('\n');
        }
        std::fs::write(&path, out)
            .with_context(|| format!("cannot write webtag list to {}", path.as_ref().display()))
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

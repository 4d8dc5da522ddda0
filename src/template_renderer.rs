//! One-pass webtag substitution over template text.

use crate::render_context::RenderContext;
use crate::tag_invocation::TagInvocation;
use crate::tag_params::TagParams;
use crate::tag_registry::TagRegistry;
use anyhow::{Context, Result};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

// One tag occurrence; quoted parameter values may contain `>`.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"<#([^>"]*(?:"[^"]*"[^>"]*)*)>"##).expect("webtag regex parses")
});

pub struct TemplateRenderer {
    registry: TagRegistry,
}

impl TemplateRenderer {
    pub fn new(registry: TagRegistry) -> Self {
        Self { registry }
    }

    pub const fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    /// Substitute every webtag in `text`. A single linear pass: resolver
    /// output is never re-scanned, so tags cannot nest or expand recursively.
    pub fn render_text(&self, text: &str, ctx: &RenderContext) -> String {
        let mut matched = 0usize;
        let rendered = RE_TAG.replace_all(text, |caps: &Captures| {
            matched += 1;
            self.render_tag(&caps[1], ctx)
        });
        if text.matches("<#").count() > matched {
            warn!("unterminated webtag delimiter left verbatim in rendered output");
        }
        rendered.into_owned()
    }

    fn render_tag(&self, inner: &str, ctx: &RenderContext) -> String {
        let invocation = match TagInvocation::new_from_text(inner) {
            Some(invocation) => invocation,
            None => {
                debug!("empty webtag invocation rendered as empty");
                return String::new();
            }
        };
        match self.registry.resolve(invocation.name()) {
            Some(resolver) => {
                let params = TagParams::new_from_invocation(&invocation);
                resolver(&params, ctx)
            }
            None => {
                debug!("unknown webtag '{}' rendered as empty", invocation.name());
                String::new()
            }
        }
    }

    /// Render a template file. A missing or unreadable template is an error;
    /// the caller skips it and produces no partial output.
    pub fn render_file<P: AsRef<Path>>(&self, path: P, ctx: &RenderContext) -> Result<String> {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read template {}", path.as_ref().display()))?;
        Ok(self.render_text(&text, ctx))
    }
}

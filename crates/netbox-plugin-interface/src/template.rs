//! Template content injection.
//!
//! Plugins inject HTML into the host's object detail pages through
//! [`TemplateExtension`]s. The plugin registers *classes*
//! ([`TemplateExtensionClass`]); the host instantiates one extension per
//! render with that request's [`TemplateContext`].
//!
//! The template engine itself belongs to the host and is reached through the
//! [`TemplateRenderer`] trait.

use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;

/// Context handed to an extension: `object`, `request`, `settings`, `config`.
pub type TemplateContext = serde_json::Map<String, serde_json::Value>;

/// Result of a single slot; `None` means the extension does not fill it.
pub type SlotContent = Result<Option<String>, RenderError>;

/// Host-side template engine.
pub trait TemplateRenderer {
    fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, RenderError>;
}

/// Page regions an extension can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateSlot {
    LeftPage,
    RightPage,
    FullWidthPage,
    Buttons,
}

impl TemplateSlot {
    pub const ALL: [TemplateSlot; 4] = [
        TemplateSlot::LeftPage,
        TemplateSlot::RightPage,
        TemplateSlot::FullWidthPage,
        TemplateSlot::Buttons,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateSlot::LeftPage => "left_page",
            TemplateSlot::RightPage => "right_page",
            TemplateSlot::FullWidthPage => "full_width_page",
            TemplateSlot::Buttons => "buttons",
        }
    }
}

impl fmt::Display for TemplateSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content an extension injects into a detail page.
///
/// Every slot defaults to `Ok(None)`; override the ones the extension fills.
/// Returned HTML is inserted as-is.
pub trait TemplateExtension {
    /// Context this instance was created with.
    fn context(&self) -> &TemplateContext;

    /// Content rendered on the left of the detail page.
    fn left_page(&self, _renderer: &dyn TemplateRenderer) -> SlotContent {
        Ok(None)
    }

    /// Content rendered on the right of the detail page.
    fn right_page(&self, _renderer: &dyn TemplateRenderer) -> SlotContent {
        Ok(None)
    }

    /// Content rendered across the full width of the detail page.
    fn full_width_page(&self, _renderer: &dyn TemplateRenderer) -> SlotContent {
        Ok(None)
    }

    /// Buttons appended to the detail page's button row.
    fn buttons(&self, _renderer: &dyn TemplateRenderer) -> SlotContent {
        Ok(None)
    }

    /// Render `template_name` with this instance's context.
    ///
    /// Keys in `extra_context` take precedence over the instance context.
    fn render(
        &self,
        renderer: &dyn TemplateRenderer,
        template_name: &str,
        extra_context: Option<TemplateContext>,
    ) -> Result<String, RenderError> {
        let mut context = self.context().clone();
        if let Some(extra) = extra_context {
            context.extend(extra);
        }
        renderer.render(template_name, &context)
    }

    fn render_slot(&self, slot: TemplateSlot, renderer: &dyn TemplateRenderer) -> SlotContent {
        match slot {
            TemplateSlot::LeftPage => self.left_page(renderer),
            TemplateSlot::RightPage => self.right_page(renderer),
            TemplateSlot::FullWidthPage => self.full_width_page(renderer),
            TemplateSlot::Buttons => self.buttons(renderer),
        }
    }
}

/// A statically declared extension type.
///
/// `MODEL` is the namespaced model the extension targets, e.g. `dcim.site`.
/// Leaving it `None` makes registration fail.
pub trait TemplateExtensionType: TemplateExtension + Sized + 'static {
    const NAME: &'static str;
    const MODEL: Option<&'static str>;

    fn new(context: TemplateContext) -> Self;
}

type Constructor = dyn Fn(TemplateContext) -> Box<dyn TemplateExtension> + Send + Sync;

/// A registrable extension class: target model plus a per-render constructor.
#[derive(Clone)]
pub struct TemplateExtensionClass {
    name: String,
    model: Option<String>,
    constructor: Arc<Constructor>,
}

impl TemplateExtensionClass {
    /// Class backed by a statically declared extension type.
    pub fn of<T: TemplateExtensionType>() -> Self {
        let constructor: Arc<Constructor> =
            Arc::new(|context: TemplateContext| -> Box<dyn TemplateExtension> {
                Box::new(T::new(context))
            });
        Self {
            name: T::NAME.to_string(),
            model: T::MODEL.map(str::to_string),
            constructor,
        }
    }

    /// Class whose model and constructor are only known at runtime.
    pub fn new<F>(name: impl Into<String>, model: Option<&str>, constructor: F) -> Self
    where
        F: Fn(TemplateContext) -> Box<dyn TemplateExtension> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            model: model.map(str::to_string),
            constructor: Arc::new(constructor),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn instantiate(&self, context: TemplateContext) -> Box<dyn TemplateExtension> {
        (self.constructor)(context)
    }
}

impl fmt::Debug for TemplateExtensionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateExtensionClass")
            .field("name", &self.name)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

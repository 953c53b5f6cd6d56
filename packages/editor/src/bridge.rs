//! # Editor Bridge
//!
//! Thin adapter over the external visual-editor capability. The canvas is
//! an opaque third-party instance: it can render markup, accept edits, and
//! report current markup and styles on demand. The bridge never interprets
//! markup; it is a pass-through between the canvas and the composition's
//! external representation.
//!
//! The surface handle is owned by the hosting view: `mount` when the view
//! appears, `dispose` when it is torn down. Ownership is explicit rather
//! than an implicitly-managed singleton.

use crate::errors::EditorError;
use pagebuilder_model::{PageComposition, Section};
use pagebuilder_styles::merge_to_css;
use serde::{Deserialize, Serialize};

/// Contract with the opaque visual-editor capability.
pub trait EditorSurface: Send {
    fn mount(&mut self) -> Result<(), EditorError>;
    fn dispose(&mut self);

    /// Current markup as the canvas reports it.
    fn markup(&self) -> String;

    /// Current style text as the canvas reports it.
    fn styles(&self) -> String;

    fn set_markup(&mut self, markup: &str);
    fn set_styles(&mut self, styles: &str);
}

/// Markup + styles pulled from the canvas in one read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub markup: String,
    pub styles: String,
}

type ChangeListener = Box<dyn FnMut() + Send>;

/// Owns the surface for the lifetime of the hosting view and tracks dirty
/// state across canvas edits.
pub struct EditorBridge {
    surface: Box<dyn EditorSurface>,
    mounted: bool,
    dirty: bool,
    change_listeners: Vec<ChangeListener>,
}

impl EditorBridge {
    pub fn new(surface: Box<dyn EditorSurface>) -> Self {
        Self {
            surface,
            mounted: false,
            dirty: false,
            change_listeners: Vec::new(),
        }
    }

    pub fn mount(&mut self) -> Result<(), EditorError> {
        if self.mounted {
            return Err(EditorError::AlreadyMounted);
        }
        self.surface.mount()?;
        self.mounted = true;
        Ok(())
    }

    pub fn dispose(&mut self) {
        if self.mounted {
            self.surface.dispose();
            self.mounted = false;
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Register a callback invoked after any user edit inside the canvas.
    pub fn on_content_changed(&mut self, listener: impl FnMut() + Send + 'static) {
        self.change_listeners.push(Box::new(listener));
    }

    /// The hosting view forwards canvas edit events here.
    pub fn notify_content_changed(&mut self) {
        self.dirty = true;
        for listener in &mut self.change_listeners {
            listener();
        }
    }

    fn ensure_mounted(&self) -> Result<(), EditorError> {
        if self.mounted {
            Ok(())
        } else {
            Err(EditorError::NotMounted)
        }
    }

    pub fn markup(&self) -> Result<String, EditorError> {
        self.ensure_mounted()?;
        Ok(self.surface.markup())
    }

    pub fn styles(&self) -> Result<String, EditorError> {
        self.ensure_mounted()?;
        Ok(self.surface.styles())
    }

    pub fn set_markup(&mut self, markup: &str) -> Result<(), EditorError> {
        self.ensure_mounted()?;
        self.surface.set_markup(markup);
        Ok(())
    }

    pub fn set_styles(&mut self, styles: &str) -> Result<(), EditorError> {
        self.ensure_mounted()?;
        self.surface.set_styles(styles);
        Ok(())
    }

    /// Push a section's stored template into the canvas. Loading replaces
    /// whatever was there, so the dirty flag resets.
    pub fn load_section(&mut self, section: &Section) -> Result<(), EditorError> {
        self.ensure_mounted()?;
        self.surface.set_markup(&section.template_markup);
        self.surface.set_styles(&section.template_styles);
        self.dirty = false;
        Ok(())
    }

    /// Push the composition's external representation into the canvas:
    /// placed markup in list order plus the merged page stylesheet.
    pub fn load_composition(&mut self, composition: &PageComposition) -> Result<(), EditorError> {
        self.ensure_mounted()?;
        self.surface.set_markup(&composition.combined_markup());
        self.surface
            .set_styles(&merge_to_css(composition.style_fragments()));
        self.dirty = false;
        Ok(())
    }

    /// Pull current content for a section save. Clears the dirty flag: the
    /// snapshot is what gets persisted.
    pub fn take_snapshot(&mut self) -> Result<ContentSnapshot, EditorError> {
        self.ensure_mounted()?;
        let snapshot = ContentSnapshot {
            markup: self.surface.markup(),
            styles: self.surface.styles(),
        };
        self.dirty = false;
        Ok(snapshot)
    }
}

impl Drop for EditorBridge {
    fn drop(&mut self) {
        self.dispose();
    }
}

//! The root of a scene tree and its cached rendering.
//!
//! [`RootNode`] owns the root [`GroupNode`] and a raster cache of it. The
//! cache moves between two states:
//!
//! - **clean**: the cached image matches the tree; drawing only blits it.
//! - **dirty**: something changed since the last render; the next draw
//!   rasterizes the tree again.
//!
//! Any invalidation from the tree, a viewport change or a new output size
//! makes the root dirty. Rendering scales the root group so that the
//! viewport fills the output.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use log::{debug, trace};

use collage_core::{
    color::Color,
    geometry::{PixelSize, Point, Size, Vec2},
    image::Image,
    surface::{PixmapSurface, Surface},
};

use crate::{CollageError, group::GroupNode, node::InvalidationSink};

/// Dirty flag and change listener shared with the tree's sink.
struct RootState {
    dirty: Cell<bool>,
    listener: RefCell<Option<Rc<dyn Fn()>>>,
}

impl RootState {
    fn mark_dirty(&self) {
        self.dirty.set(true);
        let listener = self.listener.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }
}

/// The root of a scene tree, caching its rasterization.
pub struct RootNode {
    root: GroupNode,
    state: Rc<RootState>,
    viewport: Size,
    last_size: Option<Size>,
    cache: Option<Image>,
    background: Option<Color>,
    render_count: u64,
}

impl RootNode {
    /// Creates an empty, dirty root for the given viewport.
    pub fn new(viewport: Size) -> Self {
        let state = Rc::new(RootState {
            dirty: Cell::new(true),
            listener: RefCell::new(None),
        });
        let weak = Rc::downgrade(&state);
        let sink = InvalidationSink::new(move || {
            if let Some(state) = weak.upgrade() {
                state.mark_dirty();
            }
        });

        let mut root = GroupNode::new();
        root.set_sink(Some(sink));
        Self {
            root,
            state,
            viewport,
            last_size: None,
            cache: None,
            background: None,
            render_count: 0,
        }
    }

    pub fn root_group(&self) -> &GroupNode {
        &self.root
    }

    pub fn root_group_mut(&mut self) -> &mut GroupNode {
        &mut self.root
    }

    /// Returns the sink shared by every node in the tree.
    pub fn sink(&self) -> Option<&InvalidationSink> {
        self.root.sink()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty.get()
    }

    /// Returns how many times the tree has been rasterized.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport, invalidating only if it changed.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.invalidate();
        }
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Sets the background color, invalidating only if it changed.
    pub fn set_background(&mut self, background: Option<Color>) {
        if self.background != background {
            self.background = background;
            self.invalidate();
        }
    }

    /// Registers a callback run on every invalidation.
    pub fn set_invalidate_listener(&mut self, listener: Option<Rc<dyn Fn()>>) {
        *self.state.listener.borrow_mut() = listener;
    }

    /// Returns the image produced by the last render.
    pub fn cached_image(&self) -> Option<&Image> {
        self.cache.as_ref()
    }

    /// Returns the output size of the last render.
    pub fn last_rendered_size(&self) -> Option<Size> {
        self.last_size
    }

    /// Marks the root dirty and notifies the listener.
    pub fn invalidate(&self) {
        self.state.mark_dirty();
    }

    /// Returns true if drawing at `output_size` would rasterize again.
    pub fn needs_render(&self, output_size: Size) -> bool {
        self.is_dirty() || self.cache.is_none() || self.last_size != Some(output_size)
    }

    /// Renders the tree at `output_size` if needed and returns the cache.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Raster`] if the offscreen image cannot be
    /// allocated, which includes an output size with no pixels.
    pub fn render(&mut self, output_size: Size) -> Result<&Image, CollageError> {
        if self.needs_render(output_size) {
            self.rasterize(output_size)?;
        }
        self.cache.as_ref().ok_or(CollageError::Raster {
            width: 0,
            height: 0,
        })
    }

    /// Draws the tree into `surface` at `output_size`, rasterizing only when
    /// the root is dirty or the size changed.
    ///
    /// An output size with no pixels draws nothing.
    pub fn draw(&mut self, surface: &mut dyn Surface, output_size: Size) -> Result<(), CollageError> {
        if PixelSize::ceil(output_size).is_empty() {
            return Ok(());
        }
        let image = self.render(output_size)?;
        trace!(width = image.width(), height = image.height(); "Blitting cached image");
        surface.draw_image(image, Point::ORIGIN);
        Ok(())
    }

    /// Draws the tree straight into `surface`, bypassing the cache.
    ///
    /// Used for vector output, where rasterizing would lose resolution.
    pub fn draw_direct(&mut self, surface: &mut dyn Surface, output_size: Size) {
        self.fit_viewport(output_size);
        self.root.draw(surface);
    }

    fn fit_viewport(&mut self, output_size: Size) {
        let scale = Vec2::new(
            axis_scale(output_size.width, self.viewport.width),
            axis_scale(output_size.height, self.viewport.height),
        );
        if self.root.scale() != scale {
            self.root.set_scale(scale);
        }
    }

    fn rasterize(&mut self, output_size: Size) -> Result<(), CollageError> {
        self.fit_viewport(output_size);

        let pixels = PixelSize::ceil(output_size);
        let mut surface = PixmapSurface::new(pixels).ok_or(CollageError::Raster {
            width: pixels.width(),
            height: pixels.height(),
        })?;
        surface.clear(self.background);
        self.root.draw(&mut surface);

        self.cache = Some(surface.into_image());
        self.last_size = Some(output_size);
        self.state.dirty.set(false);
        self.render_count += 1;
        debug!(
            width = pixels.width(),
            height = pixels.height(),
            render_count = self.render_count;
            "Rendered scene into cache"
        );
        Ok(())
    }
}

fn axis_scale(output: f64, viewport: f64) -> f64 {
    if viewport > 0.0 && viewport.is_finite() {
        output / viewport
    } else {
        1.0
    }
}

impl std::fmt::Debug for RootNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootNode")
            .field("viewport", &self.viewport)
            .field("dirty", &self.is_dirty())
            .field("last_size", &self.last_size)
            .field("render_count", &self.render_count)
            .field("children", &self.root.len())
            .finish()
    }
}

//! The painter: public entry point to a scene.
//!
//! A [`Painter`] owns a scene session: the content callback, the composer
//! that diffs what it produces and the [`RootNode`] that caches the
//! rendered result. Drawing composes lazily, only when the content has never
//! run, the size changed, or an [`Input`](crate::Input) it read has changed.
//!
//! # Examples
//!
//! ```
//! use collage::{Painter, GroupTransform};
//! use collage_core::{draw::circle, geometry::Size};
//!
//! let mut painter = Painter::builder(Size::new(100.0, 100.0)).build(|scene, width, height| {
//!     scene.group(GroupTransform::translate(width / 2.0, height / 2.0), |scene| {
//!         scene.elements([circle(|c| c.radius = 20.0)]);
//!     });
//! });
//!
//! let image = painter.render_image(Size::new(100.0, 100.0)).unwrap();
//! assert_eq!(image.width(), 100);
//! ```

use std::{fs, path::Path, rc::Rc};

use log::{debug, info};

use collage_core::{
    color::Color,
    geometry::Size,
    image::Image,
    surface::{Surface, SvgSurface},
};

use crate::{
    CollageError,
    applier::{Applier, SceneApplier},
    compose::{Composer, SceneBuilder},
    config::AppConfig,
    input::{Dependency, Observer},
    root::RootNode,
};

/// Something that can be drawn into a surface at a requested size.
pub trait Drawable {
    /// Returns the natural size of the drawable in pixels.
    fn intrinsic_size(&self) -> Size;

    /// Draws into `surface`, filling `size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the drawable cannot be rendered.
    fn draw(&mut self, surface: &mut dyn Surface, size: Size) -> Result<(), CollageError>;
}

type Content = Box<dyn FnMut(&mut SceneBuilder, f64, f64)>;

/// Builder for [`Painter`].
pub struct PainterBuilder {
    nominal: Size,
    density: f64,
    viewport: Option<Size>,
    background: Option<Color>,
    listener: Option<Rc<dyn Fn()>>,
}

impl PainterBuilder {
    fn new(nominal: Size) -> Self {
        Self {
            nominal,
            density: 1.0,
            viewport: None,
            background: None,
            listener: None,
        }
    }

    /// Sets the number of pixels per nominal unit.
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the coordinate space the content is written against.
    ///
    /// Defaults to the intrinsic size.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Registers a callback run whenever the scene needs a new frame: the
    /// tree changed, or an input the content read was written.
    pub fn with_invalidate_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    /// Creates the painter. `content` receives the scene builder and the
    /// viewport width and height.
    pub fn build(self, content: impl FnMut(&mut SceneBuilder, f64, f64) + 'static) -> Painter {
        let intrinsic = scaled(self.nominal, self.density);
        let viewport = self.viewport.unwrap_or(intrinsic);

        let input_observer = self.listener.clone().map(|listener| -> Rc<Observer> {
            Rc::new(move || listener())
        });
        let mut root = RootNode::new(viewport);
        root.set_background(self.background);
        root.set_invalidate_listener(self.listener);

        info!(
            width = intrinsic.width,
            height = intrinsic.height,
            density = self.density;
            "Painter created"
        );
        Painter {
            nominal: self.nominal,
            density: self.density,
            explicit_viewport: self.viewport,
            root,
            composer: Composer::new(),
            content: Some(Box::new(content)),
            dependencies: Vec::new(),
            input_observer,
            needs_compose: true,
            disposed: false,
        }
    }
}

/// Renders a declarative scene, recomposing and re-rasterizing only what
/// changed.
///
/// The session is released by [`dispose`](Self::dispose) or when the
/// painter is dropped. A disposed painter returns
/// [`CollageError::Disposed`] from every drawing call.
pub struct Painter {
    nominal: Size,
    density: f64,
    explicit_viewport: Option<Size>,
    root: RootNode,
    composer: Composer,
    content: Option<Content>,
    dependencies: Vec<Dependency>,
    /// Forwards input changes to the invalidate listener. Inputs hold it
    /// weakly, so dropping it silences them.
    input_observer: Option<Rc<Observer>>,
    needs_compose: bool,
    disposed: bool,
}

impl Painter {
    /// Starts building a painter with the given nominal size.
    pub fn builder(nominal: Size) -> PainterBuilder {
        PainterBuilder::new(nominal)
    }

    /// Creates a painter from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Config`] if a size is invalid or the
    /// background color does not parse.
    pub fn from_config(
        config: &AppConfig,
        content: impl FnMut(&mut SceneBuilder, f64, f64) + 'static,
    ) -> Result<Self, CollageError> {
        let painter_config = config.painter();
        painter_config.validate()?;
        let background = config
            .style()
            .background_color()
            .map_err(CollageError::Config)?;

        let mut builder =
            Painter::builder(painter_config.nominal_size()).with_density(painter_config.density());
        if let Some(viewport) = painter_config.explicit_viewport() {
            builder = builder.with_viewport(viewport);
        }
        if let Some(color) = background {
            builder = builder.with_background(color);
        }
        Ok(builder.build(content))
    }

    pub fn nominal_size(&self) -> Size {
        self.nominal
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Returns the coordinate space the content is written against.
    pub fn viewport(&self) -> Size {
        self.explicit_viewport
            .unwrap_or_else(|| scaled(self.nominal, self.density))
    }

    pub fn root(&self) -> &RootNode {
        &self.root
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Changes the nominal size, recomposing on the next draw if it differs.
    pub fn set_size(&mut self, nominal: Size) {
        if self.nominal != nominal {
            self.nominal = nominal;
            self.viewport_changed();
        }
    }

    /// Sets or clears the explicit viewport.
    pub fn set_viewport(&mut self, viewport: Option<Size>) {
        if self.explicit_viewport != viewport {
            self.explicit_viewport = viewport;
            self.viewport_changed();
        }
    }

    fn viewport_changed(&mut self) {
        let viewport = self.viewport();
        self.root.set_viewport(viewport);
        self.needs_compose = true;
    }

    /// Returns true if the next draw will run the content again.
    pub fn is_stale(&self) -> bool {
        !self.disposed
            && (self.needs_compose || self.dependencies.iter().any(Dependency::is_stale))
    }

    /// Runs the content and applies the difference to the tree.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Disposed`] after [`dispose`](Self::dispose).
    pub fn recompose(&mut self) -> Result<(), CollageError> {
        let content = self.content.as_mut().ok_or(CollageError::Disposed)?;
        let viewport = self
            .explicit_viewport
            .unwrap_or_else(|| scaled(self.nominal, self.density));

        let mut scene = SceneBuilder::new();
        content(&mut scene, viewport.width, viewport.height);
        let (desc, dependencies) = scene.finish();

        let ops = self.composer.compose(desc);
        let op_count = ops.len();
        SceneApplier::new(self.root.root_group_mut()).apply_all(ops);

        if let Some(observer) = &self.input_observer {
            for dependency in &dependencies {
                dependency.observe(observer);
            }
        }
        self.dependencies = dependencies;
        self.needs_compose = false;
        debug!(
            ops = op_count,
            dependencies = self.dependencies.len(),
            nodes = self.root.root_group().descendant_count();
            "Applied composition"
        );
        Ok(())
    }

    fn compose_if_stale(&mut self) -> Result<(), CollageError> {
        if self.disposed {
            return Err(CollageError::Disposed);
        }
        if self.is_stale() {
            self.recompose()?;
        }
        Ok(())
    }

    /// Renders the scene at `output_size` and returns the cached image.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Raster`] if the image cannot be allocated and
    /// [`CollageError::Disposed`] after disposal.
    pub fn render_image(&mut self, output_size: Size) -> Result<&Image, CollageError> {
        self.compose_if_stale()?;
        self.root.render(output_size)
    }

    /// Renders the scene at `output_size` and encodes it as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Encode`] if encoding fails, plus the errors of
    /// [`render_image`](Self::render_image).
    pub fn render_png(&mut self, output_size: Size) -> Result<Vec<u8>, CollageError> {
        self.render_image(output_size)?
            .encode_png()
            .map_err(CollageError::Encode)
    }

    /// Draws the scene as vector graphics, bypassing the raster cache.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Disposed`] after disposal.
    pub fn render_svg(&mut self, output_size: Size) -> Result<svg::Document, CollageError> {
        self.compose_if_stale()?;
        let mut surface = SvgSurface::new(output_size);
        surface.set_background(self.root.background());
        self.root.draw_direct(&mut surface, output_size);
        Ok(surface.finish())
    }

    /// Writes the scene to `path`: SVG for a `.svg` extension, PNG otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::Io`] if the file cannot be written, plus the
    /// errors of the underlying render.
    pub fn export(&mut self, path: impl AsRef<Path>, output_size: Size) -> Result<(), CollageError> {
        let path = path.as_ref();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let document = self.render_svg(output_size)?;
            svg::save(path, &document)?;
        } else {
            let png = self.render_png(output_size)?;
            fs::write(path, png)?;
        }
        info!(output_file = path.display().to_string(), svg = is_svg; "Scene exported");
        Ok(())
    }

    /// Tears down the session: empties the tree and stops recomposition.
    ///
    /// Calling this more than once has no further effect.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.root.set_invalidate_listener(None);
        self.input_observer = None;
        let ops = self.composer.dispose();
        SceneApplier::new(self.root.root_group_mut()).apply_all(ops);
        self.content = None;
        self.dependencies.clear();
        self.disposed = true;
        info!(render_count = self.root.render_count(); "Painter session disposed");
    }
}

impl Drawable for Painter {
    fn intrinsic_size(&self) -> Size {
        scaled(self.nominal, self.density)
    }

    fn draw(&mut self, surface: &mut dyn Surface, size: Size) -> Result<(), CollageError> {
        self.compose_if_stale()?;
        self.root.draw(surface, size)
    }
}

impl Drop for Painter {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Painter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Painter")
            .field("nominal", &self.nominal)
            .field("density", &self.density)
            .field("viewport", &self.viewport())
            .field("root", &self.root)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

fn scaled(size: Size, density: f64) -> Size {
    Size::new(size.width * density, size.height * density)
}

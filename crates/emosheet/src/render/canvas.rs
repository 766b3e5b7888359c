use super::{Portrait, Result, Scene, SheetRenderer};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Single-slot holder for the current portrait, shared between an image loader and renders.
///
/// Storing replaces whatever was there, so the last successful load wins. A render takes one
/// [`snapshot`](Self::snapshot) when it starts: a render issued while a load is still in flight
/// draws the placeholder and is not re-run once the load lands.
#[derive(Debug, Clone, Default)]
pub struct PortraitSlot {
    inner: Arc<RwLock<Option<Arc<Portrait>>>>,
}

impl PortraitSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, portrait: Portrait) {
        tracing::debug!(
            width = portrait.width,
            height = portrait.height,
            "portrait stored"
        );
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(portrait));
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn snapshot(&self) -> Option<Arc<Portrait>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Decodes PNG/JPEG bytes and stores the result. A failed decode leaves the slot unchanged.
    #[cfg(feature = "raster")]
    pub fn load_bytes(&self, bytes: &[u8]) -> super::raster::Result<()> {
        let portrait = super::raster::decode_portrait(bytes)?;
        self.store(portrait);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RenderedSheet {
    pub scene: Scene,
    pub svg: String,
}

/// Shared surface holding the last successfully rendered sheet.
///
/// Renders are serialized; each one builds the complete sheet before swapping it in, so readers
/// only ever see a finished sheet and a failed render keeps the previous one.
#[derive(Debug, Default)]
pub struct SheetCanvas {
    render_lock: Mutex<()>,
    current: RwLock<Option<Arc<RenderedSheet>>>,
}

impl SheetCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        renderer: &SheetRenderer,
        text: &str,
        portraits: &PortraitSlot,
    ) -> Result<Arc<RenderedSheet>> {
        let _guard = self
            .render_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let portrait = portraits.snapshot();
        let scene = match renderer.render_scene_sync(text, portrait.as_deref()) {
            Ok(scene) => scene,
            Err(err) => {
                tracing::debug!(error = %err, "render failed, keeping previous sheet");
                return Err(err);
            }
        };
        let svg = emosheet_render::svg::render_scene_svg(&scene, &renderer.svg);
        let sheet = Arc::new(RenderedSheet { scene, svg });

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&sheet));
        Ok(sheet)
    }

    pub fn current(&self) -> Option<Arc<RenderedSheet>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_svg(&self) -> Option<String> {
        self.current().map(|sheet| sheet.svg.clone())
    }
}

//! `HtmlImageElement`-backed texture source

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, WebGlTexture};

use super::webgl::GlContext;
use crate::effects::{DecodeListener, ListenerId, TextureSize, TextureSource};

type LoadClosure = Closure<dyn FnMut()>;

/// Image that reports decode completion through the element's `load` event.
///
/// The GL upload happens lazily on first draw and is redone whenever the
/// element loads a new image.
pub struct ImageTexture {
    image: HtmlImageElement,
    listeners: RefCell<HashMap<ListenerId, LoadClosure>>,
    // Removed closures may still be on the stack (a listener that releases
    // itself), and wasm-bindgen aborts if a running closure is dropped.
    retired: RefCell<Vec<LoadClosure>>,
    next_id: Cell<u64>,
    uploaded: Rc<RefCell<Option<WebGlTexture>>>,
    invalidate: LoadClosure,
}

impl ImageTexture {
    pub fn new(image: HtmlImageElement) -> Self {
        let uploaded: Rc<RefCell<Option<WebGlTexture>>> = Rc::new(RefCell::new(None));

        let stale = uploaded.clone();
        let invalidate = Closure::wrap(Box::new(move || {
            stale.borrow_mut().take();
        }) as Box<dyn FnMut()>);
        let callback = invalidate.as_ref().unchecked_ref();
        if let Err(e) = image.add_event_listener_with_callback("load", callback) {
            warn!("image texture: cannot watch for reloads: {:?}", e);
        }

        Self {
            image,
            listeners: RefCell::new(HashMap::new()),
            retired: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            uploaded,
            invalidate,
        }
    }

    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    /// GL texture for the current image, uploading it on first use.
    ///
    /// `Ok(None)` while the image is still decoding.
    pub fn gl_texture(&self, ctx: &GlContext) -> Result<Option<WebGlTexture>, String> {
        if !self.is_decoded() {
            return Ok(None);
        }
        if let Some(texture) = self.uploaded.borrow().as_ref() {
            return Ok(Some(texture.clone()));
        }

        let texture = ctx.upload_image(&self.image)?;
        *self.uploaded.borrow_mut() = Some(texture.clone());
        Ok(Some(texture))
    }
}

impl TextureSource for ImageTexture {
    fn is_decoded(&self) -> bool {
        self.image.complete() && self.image.natural_width() > 0
    }

    fn size(&self) -> Option<TextureSize> {
        self.is_decoded()
            .then(|| TextureSize::new(self.image.natural_width(), self.image.natural_height()))
    }

    fn add_decode_listener(&self, listener: DecodeListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let image = self.image.clone();
        let closure = Closure::wrap(Box::new(move || {
            listener(TextureSize::new(image.natural_width(), image.natural_height()));
        }) as Box<dyn FnMut()>);

        let callback = closure.as_ref().unchecked_ref();
        if let Err(e) = self.image.add_event_listener_with_callback("load", callback) {
            error!("image texture: failed to add load listener: {:?}", e);
        }
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn remove_decode_listener(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        let callback = closure.as_ref().unchecked_ref();
        if let Err(e) = self.image.remove_event_listener_with_callback("load", callback) {
            warn!("image texture: failed to remove load listener: {:?}", e);
        }
        self.retired.borrow_mut().push(closure);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for ImageTexture {
    fn drop(&mut self) {
        let _ = self
            .image
            .remove_event_listener_with_callback("load", self.invalidate.as_ref().unchecked_ref());
        for (_, closure) in self.listeners.get_mut().drain() {
            let _ = self
                .image
                .remove_event_listener_with_callback("load", closure.as_ref().unchecked_ref());
        }
    }
}

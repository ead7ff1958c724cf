//! Texture decode-notifier contract
//!
//! Effects never decode images themselves. They only need to know whether a
//! texture is ready, how large it is, and to be told once when it becomes
//! ready. [`TextureSource`] is that contract; [`Texture`] is a plain shared
//! implementation, and the browser-backed one lives in `render::image`.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Pixel dimensions of a decoded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }
}

/// Token identifying one registered decode listener on one texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Called with the decoded size when a texture finishes decoding
pub type DecodeListener = Rc<dyn Fn(TextureSize)>;

pub trait TextureSource {
    fn is_decoded(&self) -> bool;

    /// Dimensions, once decoded
    fn size(&self) -> Option<TextureSize>;

    /// Register a listener for decode completion.
    ///
    /// The listener stays registered until removed, so a source that decodes
    /// again (e.g. after its image is replaced) notifies it again.
    fn add_decode_listener(&self, listener: DecodeListener) -> ListenerId;

    fn remove_decode_listener(&self, id: ListenerId);

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a texture, compared by identity
#[derive(Clone)]
pub struct TextureRef(Rc<dyn TextureSource>);

impl TextureRef {
    pub fn new(source: impl TextureSource + 'static) -> Self {
        Self(Rc::new(source))
    }

    pub fn source(&self) -> &dyn TextureSource {
        self.0.as_ref()
    }

    pub fn is_decoded(&self) -> bool {
        self.0.is_decoded()
    }

    pub fn size(&self) -> Option<TextureSize> {
        self.0.size()
    }

    /// Register `listener` and return a handle that can later detach it
    pub fn listen_for_decode(&self, listener: DecodeListener) -> ListenerHandle {
        let id = self.0.add_decode_listener(listener);
        ListenerHandle {
            texture: self.clone(),
            id,
        }
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for TextureRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureRef")
            .field("size", &self.size())
            .finish()
    }
}

/// A registered decode listener; releasing it detaches the listener
#[derive(Debug)]
pub struct ListenerHandle {
    texture: TextureRef,
    id: ListenerId,
}

impl ListenerHandle {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn release(self) {
        self.texture.0.remove_decode_listener(self.id);
    }
}

/// In-memory texture whose decode completion is signalled by the caller
#[derive(Clone, Default)]
pub struct Texture {
    inner: Rc<RefCell<TextureState>>,
}

#[derive(Default)]
struct TextureState {
    size: Option<TextureSize>,
    listeners: Vec<(ListenerId, DecodeListener)>,
    next_id: u64,
}

impl Texture {
    /// A texture that is still decoding
    pub fn pending() -> Self {
        Self::default()
    }

    /// A texture that is already decoded
    pub fn decoded(width: u32, height: u32) -> Self {
        let texture = Self::default();
        texture.inner.borrow_mut().size = Some(TextureSize::new(width, height));
        texture
    }

    /// Record the decoded size and notify every registered listener.
    ///
    /// Listeners may detach themselves (or others) while being notified.
    pub fn finish_decoding(&self, width: u32, height: u32) {
        let size = TextureSize::new(width, height);
        let listeners = {
            let mut state = self.inner.borrow_mut();
            state.size = Some(size);
            state.listeners.clone()
        };

        for (id, listener) in listeners {
            let registered = self.inner.borrow().listeners.iter().any(|(l, _)| *l == id);
            if registered {
                listener(size);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    pub fn to_ref(&self) -> TextureRef {
        TextureRef::new(self.clone())
    }
}

impl TextureSource for Texture {
    fn is_decoded(&self) -> bool {
        self.inner.borrow().size.is_some()
    }

    fn size(&self) -> Option<TextureSize> {
        self.inner.borrow().size
    }

    fn add_decode_listener(&self, listener: DecodeListener) -> ListenerId {
        let mut state = self.inner.borrow_mut();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, listener));
        id
    }

    fn remove_decode_listener(&self, id: ListenerId) {
        self.inner.borrow_mut().listeners.retain(|(l, _)| *l != id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_power_of_two() {
        assert!(TextureSize::new(256, 64).is_power_of_two());
        assert!(!TextureSize::new(256, 100).is_power_of_two());
        assert!(!TextureSize::new(0, 0).is_power_of_two());
    }

    #[test]
    fn test_listeners_fire_until_released() {
        let texture = Texture::pending();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let handle = texture
            .to_ref()
            .listen_for_decode(Rc::new(move |_: TextureSize| counter.set(counter.get() + 1)));
        assert_eq!(texture.listener_count(), 1);

        texture.finish_decoding(32, 32);
        texture.finish_decoding(32, 32);
        assert_eq!(calls.get(), 2);

        handle.release();
        texture.finish_decoding(32, 32);
        assert_eq!(calls.get(), 2);
        assert_eq!(texture.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_detach_itself() {
        let texture = Texture::pending();
        let slot: Rc<RefCell<Option<ListenerHandle>>> = Rc::new(RefCell::new(None));
        let seen = Rc::new(Cell::new(None));

        let (slot_in, seen_in) = (slot.clone(), seen.clone());
        let handle = texture.to_ref().listen_for_decode(Rc::new(move |size: TextureSize| {
            seen_in.set(Some(size));
            if let Some(handle) = slot_in.borrow_mut().take() {
                handle.release();
            }
        }));
        *slot.borrow_mut() = Some(handle);

        texture.finish_decoding(128, 64);
        assert_eq!(seen.get(), Some(TextureSize::new(128, 64)));
        assert_eq!(texture.listener_count(), 0);
    }

    #[test]
    fn test_texture_refs_compare_by_identity() {
        let a = Texture::decoded(4, 4);
        let a_ref = a.to_ref();
        assert_eq!(a_ref, a_ref.clone());
        assert_ne!(a_ref, Texture::decoded(4, 4).to_ref());
        assert!(a_ref.downcast_ref::<Texture>().is_some());
        assert_eq!(a_ref.size(), Some(TextureSize::new(4, 4)));
    }
}

//! Texture request bookkeeping.
//!
//! A slot moves `Requested -> Loading -> Ready | Failed`. Both end states are
//! terminal: a failed texture is never retried and the material that asked
//! for it keeps drawing its flat fallback color.

use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u32);

impl TextureId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Error)]
pub enum TextureLoadError {
    #[error("request failed: {0}")]
    Fetch(String),
    #[error("server answered {0}")]
    Status(u16),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("image has no pixels")]
    Empty,
}

/// Tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, TextureLoadError> {
    let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| TextureLoadError::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureLoadError::Empty);
    }
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureState {
    Requested,
    Loading,
    Ready,
    Failed,
}

impl TextureState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TextureState::Ready | TextureState::Failed)
    }
}

#[derive(Debug)]
struct Slot {
    url: String,
    state: TextureState,
    // pixels waiting for GPU upload
    pending_upload: Option<DecodedImage>,
}

#[derive(Debug, Default)]
pub struct TextureRegistry {
    slots: Vec<Slot>,
    by_url: FnvHashMap<String, TextureId>,
    closed: bool,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `url`. Repeated requests share one slot.
    pub fn request(&mut self, url: impl Into<String>) -> TextureId {
        let url = url.into();
        if let Some(&id) = self.by_url.get(&url) {
            return id;
        }
        let id = TextureId(self.slots.len() as u32);
        self.slots.push(Slot {
            url: url.clone(),
            state: TextureState::Requested,
            pending_upload: None,
        });
        self.by_url.insert(url, id);
        id
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn state(&self, id: TextureId) -> Option<TextureState> {
        self.slots.get(id.index()).map(|s| s.state)
    }

    pub fn url(&self, id: TextureId) -> Option<&str> {
        self.slots.get(id.index()).map(|s| s.url.as_str())
    }

    #[inline]
    pub fn is_ready(&self, id: TextureId) -> bool {
        self.state(id) == Some(TextureState::Ready)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Stop accepting completions; anything arriving later is dropped.
    pub fn close(&mut self) {
        self.closed = true;
        for slot in &mut self.slots {
            slot.pending_upload = None;
        }
    }

    /// Mark every requested slot as loading and hand back what to fetch.
    pub fn start_pending(&mut self) -> Vec<(TextureId, String)> {
        if self.closed {
            return Vec::new();
        }
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, s)| s.state == TextureState::Requested)
            .map(|(i, s)| {
                s.state = TextureState::Loading;
                (TextureId(i as u32), s.url.clone())
            })
            .collect()
    }

    /// Record the outcome of a load. Returns `false` when the result was
    /// discarded (registry closed, unknown id, or slot already settled).
    pub fn complete(
        &mut self,
        id: TextureId,
        result: Result<DecodedImage, TextureLoadError>,
    ) -> bool {
        if self.closed {
            log::debug!("[texture] dropping late result for #{}", id.index());
            return false;
        }
        let Some(slot) = self.slots.get_mut(id.index()) else {
            return false;
        };
        if slot.state.is_terminal() {
            return false;
        }
        match result {
            Ok(img) => {
                log::info!(
                    "[texture] loaded {} ({}x{})",
                    slot.url,
                    img.width,
                    img.height
                );
                slot.state = TextureState::Ready;
                slot.pending_upload = Some(img);
            }
            Err(e) => {
                log::warn!("[texture] {} unavailable, using fallback color: {}", slot.url, e);
                slot.state = TextureState::Failed;
            }
        }
        true
    }

    /// Ready textures whose pixels have not been handed to the GPU yet.
    pub fn drain_uploads(&mut self) -> Vec<(TextureId, DecodedImage)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.pending_upload.take().map(|img| (TextureId(i as u32), img)))
            .collect()
    }
}

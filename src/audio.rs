//! `HTMLAudioElement` backed [`AudioSource`] for the browser.

use crate::sound::{AudioSource, PlaybackError};
use log::{debug, warn};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub struct HtmlAudioSource {
    element: HtmlAudioElement,
    released: bool,
}

impl AudioSource for HtmlAudioSource {
    fn open(uri: &str, volume: f64) -> Result<Self, PlaybackError> {
        let element =
            HtmlAudioElement::new_with_src(uri).map_err(|e| PlaybackError::Load(describe(&e)))?;
        element.set_volume(volume);
        Ok(Self {
            element,
            released: false,
        })
    }

    fn play_from_start(&self) -> Result<(), PlaybackError> {
        if self.released {
            return Err(PlaybackError::NotLoaded);
        }
        self.element.set_current_time(0.0);
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::Play(describe(&e)))?;

        // Rejections (autoplay policy, decode errors) only surface later.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("{}", PlaybackError::Play(describe(&e)));
            }
        });
        Ok(())
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.element.pause() {
            debug!("Pausing released audio failed: {}", describe(&e));
        }
        self.element.set_src("");
    }
}

impl Drop for HtmlAudioSource {
    fn drop(&mut self) {
        self.release();
    }
}

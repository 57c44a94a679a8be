//! WASM bindings for encore-playback
//!
//! Binds the controller to a browser `HTMLAudioElement` and exposes the
//! command surface to JavaScript.

pub mod device;
pub mod player;
pub mod types;

pub use device::HtmlAudioDevice;
pub use player::WasmPlayer;
pub use types::TransportSnapshot;

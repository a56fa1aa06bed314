//! Everything that talks to PowerPoint / WPS.

pub mod control;
pub mod driver;
pub mod lookup;
pub mod types;

pub use control::{KeystrokeControl, KeystrokeTiming, PresentationControl, RichControl};
pub use driver::{PresentationApp, SlideShowView};
pub use lookup::{
    is_presentation_process, is_slideshow_window, Key, KeySender, KeyStroke, ProcessProbe,
    SysinfoProbe, WindowLocator,
};
pub use types::{AppKind, InkPresence, PointerMode, WindowId};

//! Interactive layer: state, events, timers and output collaborators.

pub mod debounce;
pub mod notify;
pub mod render;
pub mod session;
pub mod shortcuts;
pub mod state;

pub use debounce::Debouncer;
pub use notify::{ConsoleNotifier, Notifier, Severity, Toast, ToastNotifier};
pub use render::{JsonRenderer, Renderer, TextRenderer};
pub use session::{Session, UiEvent};
pub use shortcuts::{Key, KeyPress, Shortcut, Shortcuts};
pub use state::{AppState, DirectoryView, View};

pub mod controller;
pub mod session_state;
pub mod session_step;

pub use controller::SessionController;
pub use session_state::SessionState;
pub use session_step::{button_label_for, SessionStep};

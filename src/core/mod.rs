pub mod clock;
pub mod input;
pub mod input_adapter;
pub mod timer;
pub mod viewport;

pub use clock::{Clock, FrameTime};
pub use input::{InputEvent, InputQueue, InputSnapshot, Intent, PointerUpdate};
pub use input_adapter::WinitInput;
pub use timer::Countdown;
pub use viewport::Viewport;

pub mod atomic;
pub mod codec;
pub mod logging;
pub mod progress;

pub mod key;
pub mod sampler;

pub use key::{Key, KeyTable};
pub use sampler::{ControlSnapshot, InputSampler, KeyDisposition};

mod grounding;
mod scripts;

pub use grounding::{GroundingIntent, GroundingView};

#[cfg(test)]
pub(crate) use grounding::GroundingTestHandles;

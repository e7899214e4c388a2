mod grounding;

pub use grounding::{GroundingIntent, GroundingView};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

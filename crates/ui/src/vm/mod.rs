mod grounding_vm;

pub use grounding_vm::{DONE_HINT, GroundingFrameVm, TAP_HINT, map_grounding_frame};

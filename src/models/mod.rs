mod code;

pub use code::{
    generate_code_id, CreateCodeRequest, ScanEvent, ScanObservation, TrackedCode,
    UpdateCodeRequest,
};

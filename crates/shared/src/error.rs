use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoOp {
    WriteEvents,
    Rename,
    Delete,
}

#[derive(Debug, Error)]
#[error("demo {op:?} failed: {message}")]
pub struct DemoError {
    pub op: DemoOp,
    pub message: String,
}

impl DemoError {
    pub fn new(op: DemoOp, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

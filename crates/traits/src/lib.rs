pub mod clock;
pub mod inspection;
pub mod prompt;

pub use clock::{FixedClock, SessionClock};
pub use inspection::{
    FileComparer, InMemoryFileComparer, InMemoryLabelMapInspector, InspectionError,
    LabelMapInspector, LabelMapStatistics,
};
pub use prompt::{FixedRetryPrompt, RetryPrompt};

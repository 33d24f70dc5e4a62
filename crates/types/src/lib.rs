pub mod ids;
pub mod image;
pub mod navigation;
pub mod requirement;
pub mod timestamp;

pub use ids::PageId;
pub use image::{ImageLayer, ImageType, PageLayout};
pub use navigation::NavigationEntry;
pub use requirement::{MarkupLineMode, SegmentationMode, SegmentationRequirement};
pub use timestamp::{DEFAULT_TIMESTAMP_FORMAT, Timestamp};

pub mod listing;
pub mod notice;
pub mod popup;
pub mod rating;
pub mod saved;

pub use listing::{EntryAction, ListingEntry, SaveRequest, LOGIN_PROMPT};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use popup::InfoContent;
pub use rating::StarRating;
pub use saved::{SavedCard, SavedPanel};

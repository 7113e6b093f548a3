// ── Domain model ──

pub mod country;
pub mod region;
pub mod sort;

pub use country::{Country, Currency, Flags};
pub use region::Region;
pub use sort::{SortKey, SortOrder, SortSpec};

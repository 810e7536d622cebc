pub mod summary_service;
pub mod view_service;

pub use summary_service::{CategoryTotal, CategoryTotals, SummaryService, SummaryStatistics};
pub use view_service::{DisplayRow, ViewService};

pub mod batch;
pub mod cache;
pub mod calendar;
mod pass;
pub mod schedule;

pub use batch::schedule_all;
pub use cache::{CacheStats, ScheduleCache};
pub use calendar::{anchor, CalendarEntry, CalendarSchedule};
pub use schedule::{ProjectSchedule, Scheduler, TaskSchedule};

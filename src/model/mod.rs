pub mod cost;
pub mod date;
pub mod finish;
pub mod floor;
pub mod schedule;
pub mod state;

pub use cost::{BoqTable, CostLookup, CostRecord};
pub use date::{parse_date, IntoSimDate};
pub use finish::{Appearance, Finish, Material};
pub use floor::{Floor, FloorFilter};
pub use schedule::{Schedule, ScheduleTask, TaskId};
pub use state::{ConstructionState, StateKind};

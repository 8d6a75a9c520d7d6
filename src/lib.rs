//! # Site 4D
//!
//! A terminal 4D construction progress viewer: a programme of dated tasks
//! drives the state of every part of a 3D building model.
//!
//! ## Features
//!
//! - Fixed geometry catalog per project type, indexed by schedule task
//! - Ghost / active / done state derived from the as-of date
//! - Floor filter composed with construction state
//! - Ray picking with a transient highlight and a cost/progress readout
//! - Snapshot export to CSV and JSON
//!
//! ## Example
//!
//! ```no_run
//! use site_4d::catalog::ProjectType;
//! use site_4d::model::Schedule;
//! use site_4d::picking::Viewport;
//! use site_4d::viewer::BimViewer;
//!
//! let mut viewer = BimViewer::init(ProjectType::Villa, Viewport::default()).expect("catalog");
//! viewer.set_schedule(Schedule::load("schedule.json").expect("schedule"));
//! if let Some(report) = viewer.update_simulation("2024-01-05") {
//!     for task in &report.active_tasks {
//!         println!("{} {}%", task.name, task.percent);
//!     }
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod export;
pub mod info;
pub mod model;
pub mod picking;
pub mod scene;
pub mod simulation;
pub mod ui;
pub mod viewer;

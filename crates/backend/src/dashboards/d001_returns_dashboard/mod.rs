pub mod commands;
pub mod filter;
pub mod metrics;
pub mod presenter;
pub mod service;

pub use presenter::{ConsolePresenter, JsonPresenter, Presenter};
pub use service::{DashboardSession, DataSources};

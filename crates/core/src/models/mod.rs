pub mod chart;
pub mod finance;
pub mod session;
pub mod settings;
pub mod transaction;
pub mod view;

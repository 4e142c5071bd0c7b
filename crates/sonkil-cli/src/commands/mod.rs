pub mod catalog;
pub mod config;
pub mod guide;
pub mod history;
pub mod recommend;

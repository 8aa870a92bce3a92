pub mod action;
pub mod audit;
pub mod change_set;
pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod sink;

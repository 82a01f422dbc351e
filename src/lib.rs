pub mod action;
pub mod app;
pub mod client;
pub mod columns;
pub mod config;
pub mod domain;
pub mod event;
pub mod filter;
pub mod input;
pub mod nav;
pub mod pagination;
pub mod theme;
pub mod tui;
pub mod widgets;
pub mod worker;

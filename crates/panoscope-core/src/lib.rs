pub mod config;
pub mod consts;
pub mod error;
pub mod grid;
pub mod io;
pub mod orientation;
pub mod poi;
pub mod scan;
pub mod session;
pub mod view;
pub mod viewport;

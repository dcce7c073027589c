pub mod app;
pub mod pad;
pub mod theme;

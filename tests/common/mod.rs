#![allow(dead_code, unused_imports)]

pub mod app;
pub mod factory;
pub mod failing;

pub use app::TestApp;
pub use factory::Factory;
pub use failing::FailingStore;

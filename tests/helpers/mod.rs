// ==========================================
// 集成测试公共辅助
// ==========================================

#![allow(dead_code)]

pub mod fixture_calendar;
pub mod input_builder;

pub use fixture_calendar::fixture_calendar;
pub use input_builder::BirthInputBuilder;

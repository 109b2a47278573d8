// 数据模型
pub mod conversion;
pub mod language;

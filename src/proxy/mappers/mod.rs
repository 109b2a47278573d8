// Mappers 模块 - 提示词构建与模型输出归一化
pub mod claude;
pub mod normalizer;
pub mod prompt;

// Claude 协议
pub mod models;

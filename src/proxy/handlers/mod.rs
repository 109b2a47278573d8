// Handlers 模块 - API 端点处理器

pub mod conversion;

pub use conversion::{
    handle_convert, handle_method_not_allowed, handle_translate_all, handle_translate_detect,
    handle_translate_list,
};

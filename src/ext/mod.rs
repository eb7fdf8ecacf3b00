pub mod fallback_ext;

//! tokenweave Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! tokenweave design-token pipeline. It includes:
//!
//! - **Themes**: The fixed set of theme variants ([`theme::Theme`])
//! - **Paths**: Dotted token paths with natural ordering ([`path::TokenPath`])
//! - **Categories**: Token categories derived from the first path segment ([`category::Category`])
//! - **Values**: Literal token values and dimensions ([`value`] module)
//! - **Colors**: Parsing of the color forms understood by the formatters ([`color::Color`])

pub mod category;
pub mod color;
pub mod path;
pub mod theme;
pub mod value;

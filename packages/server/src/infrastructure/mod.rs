//! Infrastructure layer
//!
//! ドメイン層が定義する trait の具体的な実装と、通信プロトコルの DTO を提供します。

pub mod directory;
pub mod dto;
pub mod identity;
pub mod registry;

/// 配置管理模組
///
/// 負責加載與驗證遷移器配置，以及讀取資料庫連接所需的 `DB_*` 環境變數。
pub mod loader;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::{ConfigLoader, CONFIG_FILE_VAR, ENV_PREFIX};
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};

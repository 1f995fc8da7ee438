use config::{Config, ConfigError, Environment, File, Map};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::types::{DatabaseEnv, MigratorConfig};
use crate::config::validation::Validator;
use crate::error::MigratorResult;

/// 指定可選 TOML 配置檔路徑的環境變數
pub const CONFIG_FILE_VAR: &str = "MIGRATOR_CONFIG";

/// 覆寫配置時使用的環境變數前綴，例如 `MIGRATOR__LOG__LEVEL`
pub const ENV_PREFIX: &str = "MIGRATOR";

/// 配置加載器
pub struct ConfigLoader {
    file: Option<PathBuf>,
    env_source: Option<Map<String, String>>,
}

impl ConfigLoader {
    /// 使用行程環境變數建立加載器
    pub fn from_env() -> Self {
        Self {
            file: env::var_os(CONFIG_FILE_VAR).map(PathBuf::from),
            env_source: None,
        }
    }

    /// 指定配置檔路徑
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 以給定的變數表取代行程環境變數
    pub fn with_env_source<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.env_source = Some(vars.into_iter().collect());
        self
    }

    /// 建立合併後的配置來源：預設值、配置檔、環境變數（優先級依序提高）
    pub fn build(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder()
            .set_default("migrations_dir", "migrations")?
            .set_default("ssl_mode", "disable")?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?;

        if let Some(path) = &self.file {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(self.env_source.clone()),
        );

        builder.build()
    }

    /// 載入並驗證遷移器配置
    pub fn load(&self) -> MigratorResult<MigratorConfig> {
        let config: MigratorConfig = self.build()?.try_deserialize()?;

        if let Err(err) = config.validate() {
            warn!(error = %err, "configuration validation failed");
            return Err(err.into());
        }
        debug!(?config, "configuration loaded");

        Ok(config)
    }

    /// 讀取未加前綴的 `DB_*` 連接變數，空值視為未設定
    pub fn database_env(&self) -> MigratorResult<DatabaseEnv> {
        let source = Config::builder()
            .add_source(
                Environment::default()
                    .ignore_empty(true)
                    .source(self.env_source.clone()),
            )
            .build()?;

        Ok(source.try_deserialize()?)
    }
}

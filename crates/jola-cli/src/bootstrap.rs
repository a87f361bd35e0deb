use anyhow::Context;
use jola_config::JolaConfig;

/// Load `.env` (if any) and the layered config.
pub fn load_config() -> anyhow::Result<JolaConfig> {
    JolaConfig::load_with_dotenv().context("failed to load jola configuration")
}

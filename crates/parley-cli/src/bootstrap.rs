use anyhow::Context;
use parley_config::ParleyConfig;

/// Load layered configuration, picking up a `.env` file when present.
pub fn load_config() -> anyhow::Result<ParleyConfig> {
    ParleyConfig::load_with_dotenv().context("failed to load parley configuration")
}

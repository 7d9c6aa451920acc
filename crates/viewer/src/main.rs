use stockview_viewer::{ViewerConfig, config};

fn main() -> anyhow::Result<()> {
    // Logging first, so a rejected configuration is reported through it.
    stockview_observability::init(config::log_format_from_env());

    let config = match ViewerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = ?err, "invalid viewer configuration");
            return Err(err);
        }
    };

    stockview_viewer::run(config)
}

use quire_web::{config, init_tracing, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    init_tracing(cfg.server.log_format);

    let profile = cfg.pricing_profile()?;
    server::serve(&cfg, profile).await
}

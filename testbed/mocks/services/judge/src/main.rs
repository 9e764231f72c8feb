use judge_mock::{serve, JudgeScript};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = env::var("JUDGE_MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:2358".to_string());

    serve(&addr, JudgeScript::echo(), async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Judge mock shutting down");
    })
    .await
}

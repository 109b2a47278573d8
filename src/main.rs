#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hangul_relay_lib::run().await
}

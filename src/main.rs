#[tokio::main]
async fn main() -> anyhow::Result<()> {
    repo2notion::app::run().await
}

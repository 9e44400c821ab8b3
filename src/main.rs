#[tokio::main]
async fn main() -> anyhow::Result<()> {
    thrive_remote_api::run().await
}

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    llmqa::run().await
}

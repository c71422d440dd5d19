use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    projtrack::cli::run().await
}

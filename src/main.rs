#[tokio::main]
async fn main() -> anyhow::Result<()> {
    course_api::cli::run().await
}

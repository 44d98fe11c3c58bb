use anyhow::Result;
use school_portal::Portal;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    school_portal::try_or_exit(run()).await;
}

async fn run() -> Result<()> {
    Portal::create()?.run().await?;

    Ok(())
}

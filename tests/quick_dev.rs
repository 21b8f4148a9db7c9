use anyhow::Result;

// Needs a running server with a database behind it:
// cargo test --test quick_dev -- --ignored --nocapture
#[tokio::test]
#[ignore = "needs a server listening on localhost:3000"]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:3000")?;

    hc.do_get("/about").await?.print().await?;

    hc.do_get("/categories").await?.print().await?;
    hc.do_get("/items/add").await?.print().await?;
    hc.do_get("/shop").await?.print().await?;
    hc.do_get("/items?minDate=2025-01-01").await?.print().await?;
    hc.do_get("/nonexistent-path").await?.print().await?;

    Ok(())
}

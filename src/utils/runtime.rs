use anyhow::Result;

/// The bar redraws from a single thread, so the whole application lives on one runtime thread.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

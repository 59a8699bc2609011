mod apply;
mod content;
mod health_check;
mod subscriptions;

pub use apply::*;
pub use content::*;
pub use health_check::*;
pub use subscriptions::*;

/// JSON body of every error response: `{ "error": ... }`.
#[derive(serde::Serialize)]
pub struct ErrorBody<T> {
    pub error: T,
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

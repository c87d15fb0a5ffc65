use confhub_derive::confhub_error;
use std::borrow::Cow;

#[confhub_error]
pub enum LoadError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Conference not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, LoadError> {
    let raw = std::fs::read_to_string("conferences.json").context("Loading the catalog")?;
    Ok(raw)
}

fn main() {
    let _ = read();
    let _: LoadError = "boom".into();
}

use cmdkit_derive::cmdkit_error;

#[cmdkit_error]
pub enum StoreError {
    #[error("IO error: {source}")]
    Io { source: std::io::Error, context: Option<String> },
}

fn main() {}

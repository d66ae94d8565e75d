use cmdkit_derive::cmdkit_error;

#[cmdkit_error]
pub enum StoreError {
    Io(std::io::Error),
}

fn main() {}

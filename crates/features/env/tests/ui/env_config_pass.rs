use cmdkit_env::{EnvConfig, EnvField};
use std::path::PathBuf;

#[derive(Default, EnvConfig)]
pub struct Settings<T: Default> {
    pub name: String,
    pub dir: PathBuf,
    pub level: Option<u64>,
    pub json: bool,
    #[env(skip)]
    pub extra: T,
}

fn main() {
    let schema: Vec<EnvField<Settings<Vec<u8>>>> = Settings::schema();
    assert_eq!(schema.len(), 4);
}

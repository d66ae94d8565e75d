mod reexport {
    pub use cmdkit_env as env;
}

use reexport::env::EnvConfig;

#[derive(Default, reexport::env::EnvConfig)]
#[env(crate = "reexport::env")]
struct Config {
    port: u16,
}

fn main() {
    assert_eq!(Config::schema()[0].key(), "port");
}

#![allow(dead_code)]

use cmdkit_env::EnvConfig;

#[derive(EnvConfig)]
enum Mode {
    Fast,
    Slow,
}

fn main() {}

#![allow(dead_code)]

use cmdkit_env::EnvConfig;

#[derive(Default, EnvConfig)]
struct Config {
    port: u16,
    payload: Vec<u8>,
}

fn main() {}

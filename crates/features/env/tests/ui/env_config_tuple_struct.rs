#![allow(dead_code)]

use cmdkit_env::EnvConfig;

#[derive(Default, EnvConfig)]
struct Pair(u16, bool);

fn main() {}

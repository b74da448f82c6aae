//! Benchmark utilities.

use rand::Rng;
use tallykv_core::Store;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("KEY{i}")).collect()
}

/// Pick a random value out of `distinct` possible values.
pub fn random_value(distinct: usize) -> String {
    let mut rng = rand::thread_rng();
    format!("V{}", rng.gen_range(0..distinct.max(1)))
}

/// Build a store with `count` keys spread over `distinct` values.
pub fn populated_store(count: usize, distinct: usize) -> Store {
    let mut store = Store::new();
    for key in generate_keys(count) {
        store.set(&key, &random_value(distinct));
    }
    store
}

/// Build a command script of `count` random commands.
pub fn random_script(count: usize, keys: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut script = String::new();
    for _ in 0..count {
        let key = rng.gen_range(0..keys.max(1));
        let line = match rng.gen_range(0..8) {
            0 => "BEGIN".to_owned(),
            1 => "ROLLBACK".to_owned(),
            2 => "COMMIT".to_owned(),
            3 => format!("GET K{key}"),
            4 => format!("UNSET K{key}"),
            5 => format!("NUMEQUALTO {}", rng.gen_range(0..10)),
            _ => format!("SET K{key} {}", rng.gen_range(0..10)),
        };
        script.push_str(&line);
        script.push('\n');
    }
    script
}

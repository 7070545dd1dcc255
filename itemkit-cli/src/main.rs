//! `itemkit` — inspect and edit an item data store on disk.

mod args;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use args::{Command, Options, RecordKey, parse_args};
use itemkit_core::{DataStore, StoreConfig};
use serde_json::Value;

const DEFAULT_ROOT: &str = "itemkit-data";
const ROOT_ENV: &str = "ITEMKIT_ROOT";

/// `--config` beats `--root`, which beats `env_root`, which beats
/// `DEFAULT_ROOT`. `--seed` overrides any seed from the config file.
fn resolve_config(options: &Options, env_root: Option<PathBuf>) -> Result<StoreConfig, Box<dyn Error>> {
    let mut config = match (&options.config, &options.root) {
        (Some(path), _) => StoreConfig::load(path)?,
        (None, Some(root)) => StoreConfig::new(root),
        (None, None) => StoreConfig::new(env_root.unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))),
    };
    if let Some(seed) = options.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn run(config: StoreConfig, command: Command) -> Result<bool, Box<dyn Error>> {
    let mut store = DataStore::new(config);
    log::debug!("using store root {}", store.root().display());

    match command {
        Command::Id => println!("{}", store.generate_id()),
        Command::Store { key, payload } => {
            let value: Value = serde_json::from_str(&payload)?;
            store.store(&key.namespace, key.data_id, &value, key.context.as_deref())?;
            println!("wrote {}", record_path(&store, &key).display());
        }
        Command::Load(key) => {
            let Some(value) = store.load::<Value>(&key.namespace, key.data_id, key.context.as_deref())
            else {
                eprintln!("no record at {}", record_path(&store, &key).display());
                return Ok(false);
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Remove(key) => {
            store.remove(&key.namespace, key.data_id, key.context.as_deref())?;
            println!("removed {}", record_path(&store, &key).display());
        }
        Command::Path(key) => println!("{}", record_path(&store, &key).display()),
    }

    Ok(true)
}

fn record_path(store: &DataStore, key: &RecordKey) -> PathBuf {
    store.record_path(&key.namespace, key.data_id, key.context.as_deref())
}

fn main() {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .parse_env("RUST_LOG")
        .init();

    let args: Vec<String> = std::env::args().collect();
    let arg_refs: Vec<&str> = args[1..].iter().map(|s| s.as_str()).collect();

    let (options, command) = match parse_args(&arg_refs) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("itemkit: {}", e);
            process::exit(2);
        }
    };

    let env_root = std::env::var_os(ROOT_ENV).map(PathBuf::from);
    let result = resolve_config(&options, env_root).and_then(|config| run(config, command));
    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("itemkit: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn key(namespace: &str, data_id: u32, context: Option<&str>) -> RecordKey {
        RecordKey {
            namespace: namespace.to_string(),
            data_id,
            context: context.map(str::to_string),
        }
    }

    #[test]
    fn falls_back_to_env_root_then_default() {
        let options = Options::default();
        let from_env = resolve_config(&options, Some(PathBuf::from("/srv/items"))).unwrap();
        assert_eq!(from_env, StoreConfig::new("/srv/items"));

        let fallback = resolve_config(&options, None).unwrap();
        assert_eq!(fallback, StoreConfig::new(DEFAULT_ROOT));
    }

    #[test]
    fn root_flag_beats_env_root() {
        let options = Options {
            root: Some(PathBuf::from("flag-root")),
            ..Options::default()
        };
        let config = resolve_config(&options, Some(PathBuf::from("env-root"))).unwrap();
        assert_eq!(config.root, PathBuf::from("flag-root"));
    }

    #[test]
    fn config_file_beats_env_root_and_seed_flag_overrides_its_seed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("itemkit.toml");
        std::fs::write(&path, "root = \"from-file\"\nseed = 1\n").unwrap();

        let options = Options {
            config: Some(path.clone()),
            ..Options::default()
        };
        let config = resolve_config(&options, Some(PathBuf::from("env-root"))).unwrap();
        assert_eq!(config, StoreConfig::new("from-file").with_seed(1));

        let seeded = Options {
            config: Some(path),
            seed: Some(99),
            ..Options::default()
        };
        let config = resolve_config(&seeded, None).unwrap();
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            config: Some(dir.path().join("absent.toml")),
            ..Options::default()
        };
        assert!(resolve_config(&options, None).is_err());
    }

    #[test]
    fn store_load_remove_cycle() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path());
        let chest = key("chests", 42, Some("meta"));

        let stored = run(
            config.clone(),
            Command::Store {
                key: chest.clone(),
                payload: "{\"count\":5}".to_string(),
            },
        )
        .unwrap();
        assert!(stored);
        assert!(dir.path().join("chests").join("meta42").is_file());

        assert!(run(config.clone(), Command::Load(chest.clone())).unwrap());
        assert!(run(config.clone(), Command::Remove(chest.clone())).unwrap());
        assert!(!run(config.clone(), Command::Load(chest.clone())).unwrap());
        assert!(run(config, Command::Remove(chest)).is_err());
    }

    #[test]
    fn store_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let result = run(
            StoreConfig::new(dir.path()),
            Command::Store {
                key: key("chests", 1, None),
                payload: "{count".to_string(),
            },
        );
        assert!(result.is_err());
        assert!(!dir.path().join("chests").join("1").exists());
    }
}

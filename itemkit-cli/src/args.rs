use itemkit_core::DataId;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordKey {
    pub namespace: String,
    pub data_id: DataId,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Id,
    Store { key: RecordKey, payload: String },
    Load(RecordKey),
    Remove(RecordKey),
    Path(RecordKey),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Options {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub const USAGE: &str = "usage: itemkit [--root DIR | --config FILE] [--seed N] <command>

commands:
  id
  store <namespace> <id> <json> [--context C]
  load <namespace> <id> [--context C]
  remove <namespace> <id> [--context C]
  path <namespace> <id> [--context C]";

pub fn parse_args(args: &[&str]) -> Result<(Options, Command), String> {
    let mut options = Options::default();
    let mut context = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(&arg) = iter.next() {
        match arg {
            "--root" => options.root = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
            "--config" => options.config = Some(PathBuf::from(flag_value(&mut iter, arg)?)),
            "--seed" => {
                let value = flag_value(&mut iter, arg)?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                options.seed = Some(seed);
            }
            "--context" => context = Some(flag_value(&mut iter, arg)?.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {flag}")),
            _ => positional.push(arg),
        }
    }

    if options.root.is_some() && options.config.is_some() {
        return Err("--root and --config are mutually exclusive".to_string());
    }

    let Some((&name, rest)) = positional.split_first() else {
        return Err(USAGE.to_string());
    };

    let command = match (name, rest) {
        ("id", []) => Command::Id,
        ("store", [namespace, id, payload]) => Command::Store {
            key: record_key(namespace, id, context)?,
            payload: payload.to_string(),
        },
        ("load", [namespace, id]) => Command::Load(record_key(namespace, id, context)?),
        ("remove", [namespace, id]) => Command::Remove(record_key(namespace, id, context)?),
        ("path", [namespace, id]) => Command::Path(record_key(namespace, id, context)?),
        ("id" | "store" | "load" | "remove" | "path", _) => {
            return Err(format!("wrong number of arguments for {name}\n{USAGE}"));
        }
        _ => return Err(format!("unknown command: {name}\n{USAGE}")),
    };

    Ok((options, command))
}

fn flag_value<'a>(iter: &mut std::slice::Iter<'_, &'a str>, flag: &str) -> Result<&'a str, String> {
    iter.next()
        .copied()
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn record_key(namespace: &str, id: &str, context: Option<String>) -> Result<RecordKey, String> {
    let data_id = id.parse().map_err(|_| format!("invalid data id: {id}"))?;
    Ok(RecordKey {
        namespace: namespace.to_string(),
        data_id,
        context,
    })
}

//! Purpose: Hold top-level CLI command dispatch for `underline`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap; map each subcommand onto one api call.
//! Invariants: Scalar input to a collection command is a Type error, never an empty result.
//! Invariants: A missing `get` path is NotFound; JSON has no undefined to print instead.

use super::*;

use underline::api::{
    Collection, RangeSpec, compact, contains, extend, flatten, get, keys, pluck, range,
    sum_numbers, unique, values, without,
};

pub(super) fn dispatch_command(
    command: Command,
    input: Option<&Path>,
    options: OutputOptions,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Range { args, spec } => {
            let spec = match spec {
                Some(_) if !args.is_empty() => {
                    return Err(Error::new(ErrorKind::Usage)
                        .with_message("--spec cannot be combined with positional arguments")
                        .with_hint("Use either `range START END STEP` or `range --spec JSON`."));
                }
                Some(text) => parse::from_str::<RangeSpec>(&text).map_err(|err| {
                    let hint = parse::hint_for_error(&err, "--spec");
                    Error::new(ErrorKind::Usage)
                        .with_message("invalid --spec range")
                        .with_hint(hint)
                        .with_source(err)
                })?,
                None => RangeSpec::from_args(&args)?,
            };
            emit_json(json!(range(spec)), options);
            Ok(RunOutcome::ok())
        }
        Command::Get { path } => {
            let doc = read_document(input)?;
            match get(&doc, &path) {
                Some(found) => {
                    emit_json(found.clone(), options);
                    Ok(RunOutcome::ok())
                }
                None => Err(Error::new(ErrorKind::NotFound)
                    .with_message(format!("no value at path {path}"))
                    .with_key(path)),
            }
        }
        Command::Keys => {
            let doc = read_document(input)?;
            require_collection(&doc, "keys")?;
            let out = keys(&doc)
                .into_iter()
                .map(|key| match key.as_index() {
                    Some(index) => json!(index),
                    None => json!(key.to_string()),
                })
                .collect::<Vec<_>>();
            emit_json(Value::Array(out), options);
            Ok(RunOutcome::ok())
        }
        Command::Values => {
            let doc = read_document(input)?;
            let out = match require_collection(&doc, "values")? {
                Collection::Keyed(map) => values(map),
                Collection::Indexed(items) => items.to_vec(),
                Collection::Scalar(_) => Vec::new(),
            };
            emit_json(Value::Array(out), options);
            Ok(RunOutcome::ok())
        }
        Command::Flatten => {
            let doc = read_document(input)?;
            require_array(&doc, "flatten")?;
            emit_json(Value::Array(flatten(&doc)), options);
            Ok(RunOutcome::ok())
        }
        Command::Compact => {
            let doc = read_document(input)?;
            require_collection(&doc, "compact")?;
            emit_json(Value::Array(compact(&doc)), options);
            Ok(RunOutcome::ok())
        }
        Command::Unique => {
            let doc = read_document(input)?;
            require_collection(&doc, "unique")?;
            emit_json(Value::Array(unique(&doc)), options);
            Ok(RunOutcome::ok())
        }
        Command::Sum => {
            let doc = read_document(input)?;
            require_collection(&doc, "sum")?;
            emit_json(number_json(sum_numbers(&doc)?), options);
            Ok(RunOutcome::ok())
        }
        Command::Pluck { key } => {
            let doc = read_document(input)?;
            require_collection(&doc, "pluck")?;
            let out = pluck(&doc, &key)
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect::<Vec<_>>();
            emit_json(Value::Array(out), options);
            Ok(RunOutcome::ok())
        }
        Command::Without { values: excluded } => {
            let doc = read_document(input)?;
            let items = require_array(&doc, "without")?;
            let excluded = excluded
                .iter()
                .map(|text| parse_json_arg(text, "argument"))
                .collect::<Result<Vec<_>, _>>()?;
            emit_json(Value::Array(without(items, &excluded)), options);
            Ok(RunOutcome::ok())
        }
        Command::Contains { value } => {
            let target = parse_json_arg(&value, "argument")?;
            let doc = read_document(input)?;
            require_collection(&doc, "contains")?;
            emit_json(json!(contains(&doc, &target)), options);
            Ok(RunOutcome::ok())
        }
        Command::Extend { sources } => {
            let doc = read_document(input)?;
            let mut object = match doc {
                Value::Object(map) => map,
                other => return Err(type_error("extend", "an object", &other)),
            };
            let sources = sources
                .iter()
                .map(|text| match parse_json_arg(text, "argument")? {
                    Value::Object(map) => Ok(map),
                    other => Err(type_error("extend", "object sources", &other)),
                })
                .collect::<Result<Vec<_>, Error>>()?;
            let refs = sources.iter().collect::<Vec<_>>();
            extend(&mut object, &refs);
            emit_json(Value::Object(object), options);
            Ok(RunOutcome::ok())
        }
    }
}

fn require_collection<'a>(doc: &'a Value, command: &str) -> Result<Collection<'a>, Error> {
    let view = Collection::of(doc);
    if view.is_collection() {
        Ok(view)
    } else {
        Err(type_error(command, "an array or object", doc))
    }
}

fn require_array<'a>(doc: &'a Value, command: &str) -> Result<&'a [Value], Error> {
    match Collection::of(doc) {
        Collection::Indexed(items) => Ok(items),
        _ => Err(type_error(command, "an array", doc)),
    }
}

fn type_error(command: &str, expected: &str, found: &Value) -> Error {
    Error::new(ErrorKind::Type)
        .with_message(format!(
            "{command} expects {expected}, got {}",
            value_kind(found)
        ))
        .with_hint("Check the input document shape; `underline get PATH` can select a nested value.")
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Integral sums print without a trailing `.0`.
fn number_json(total: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if total.fract() == 0.0 && total.abs() <= MAX_EXACT {
        json!(total as i64)
    } else {
        json!(total)
    }
}

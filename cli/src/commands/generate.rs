//! `generate`: write random catalog data to a JSON file.

use catalog_cli_core::{
    CommandArgs, CommandFlags, CommandSpec, FlagSpec, HandlerResult, SchemaError, ValueType,
};
use catalog_data::{ActGenerator, DataKind, save_json};

pub const DEFAULT_PATH: &str = "./data/acts.json";
pub const DEFAULT_COUNT: i64 = 10;

pub fn command(program: &str) -> Result<CommandSpec, SchemaError> {
    let flags = CommandFlags::new(
        vec![
            FlagSpec::new("c", "count", ValueType::Number)
                .with_default(DEFAULT_COUNT)
                .with_description("Specify the number of items to generate (default: 10)"),
            FlagSpec::new("p", "path", ValueType::String)
                .with_default(DEFAULT_PATH)
                .with_description("Specify the path to write generated data (default: ./data/acts.json)"),
            FlagSpec::new("t", "type", ValueType::String)
                .with_description("Specify the type of data to generate (required)"),
        ],
        &["type"],
    )?;

    Ok(
        CommandSpec::new("generate, g", "Generate data for testing", run)
            .with_flags(flags)
            .with_example(&format!(
                "{program} generate --type act --count 10 --path ./data/acts.json"
            )),
    )
}

fn run(args: &CommandArgs) -> HandlerResult {
    let kind: DataKind = args.str("type")?.parse()?;
    let count = args.usize("count")?;
    let path = args.str("path")?;

    let data = match kind {
        DataKind::Act => ActGenerator::new().acts(count),
    };
    save_json(path, &data)?;
    println!("Data successfully saved to {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use catalog_cli_core::FlagValue;
    use catalog_data::read_acts;

    use super::*;

    fn args(kind: &str, count: i64, path: &str) -> CommandArgs {
        let mut args = CommandArgs::default();
        args.insert("type", FlagValue::from(kind));
        args.insert("count", FlagValue::from(count));
        args.insert("path", FlagValue::from(path));
        args
    }

    #[test]
    fn test_type_is_the_only_required_flag() {
        let command = command("catalog-requests").unwrap();
        let required: Vec<&str> = command.flags.required().map(|f| f.long.as_str()).collect();
        assert_eq!(required, ["type"]);
        assert_eq!(command.aliases(), ["generate", "g"]);
    }

    #[test]
    fn test_writes_requested_number_of_acts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/acts.json");
        run(&args("act", 3, path.to_str().unwrap())).unwrap();
        assert_eq!(read_acts(&path).unwrap().len(), 3);
    }

    #[test]
    fn test_unknown_type_lists_supported_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acts.json");
        let err = run(&args("album", 1, path.to_str().unwrap())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid type 'album', supported types are: act"
        );
        assert!(!path.exists());
    }
}

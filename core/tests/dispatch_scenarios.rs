use std::cell::RefCell;
use std::rc::Rc;

use catalog_cli_core::*;

type Calls = Rc<RefCell<Vec<(String, CommandArgs)>>>;

/// Registry shaped like the catalog CLI, with handlers that only record
/// what they were called with.
fn catalog_registry(calls: &Calls) -> Registry {
    let generate_calls = Rc::clone(calls);
    let generate = CommandSpec::new("generate, g", "Generate data for testing", move |args| {
        generate_calls
            .borrow_mut()
            .push(("generate".to_string(), args.clone()));
        Ok(())
    })
    .with_flags(
        CommandFlags::new(
            vec![
                FlagSpec::new("c", "count", ValueType::Number)
                    .with_default(10)
                    .with_description("Specify the number of items to generate (default: 10)"),
                FlagSpec::new("p", "path", ValueType::String)
                    .with_default("./data/acts.json")
                    .with_description("Specify the path to write generated data"),
                FlagSpec::new("t", "type", ValueType::String)
                    .with_description("Specify the type of data to generate (required)"),
            ],
            &["type"],
        )
        .unwrap(),
    )
    .with_example("catalog-requests generate --type act --count 10 --path ./data/acts.json");

    let request_calls = Rc::clone(calls);
    let request = CommandSpec::new("request, r", "Perform API requests", move |args| {
        request_calls
            .borrow_mut()
            .push(("request".to_string(), args.clone()));
        Ok(())
    })
    .with_flags(
        CommandFlags::new(
            vec![
                FlagSpec::new("u", "url", ValueType::String)
                    .with_description("Specify the URL for the request (required)"),
                FlagSpec::new("p", "path", ValueType::String).with_default("./data/acts.json"),
                FlagSpec::new("a", "action", ValueType::String)
                    .with_description("Specify the action for request command (required)"),
                FlagSpec::new("i", "index", ValueType::Number).with_default(0),
                FlagSpec::new("r", "range", ValueType::String).with_default("all"),
            ],
            &["url", "action"],
        )
        .unwrap(),
    )
    .with_actions(
        ActionSet::new("ACTIONS")
            .with_option("getActs", "Get all acts")
            .with_option("createAct", "Create a new act")
            .with_option("getActById", "Get an act by ID")
            .with_option("updateAct", "Update an act by ID")
            .with_option("deleteAct", "Delete an act by ID")
            .with_option("createManyActs", "Create multiple acts"),
    )
    .with_example("catalog-requests request -u http://localhost:3000/acts -a createManyActs -r 1-5");

    Registry::builder()
        .command(generate)
        .command(request)
        .build()
        .unwrap()
}

fn run(registry: &Registry, tokens: &[&str]) -> (i32, String, String) {
    let dispatcher = Dispatcher::new(registry, HelpRenderer::new("catalog-requests", Palette::plain()));
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let code = dispatcher.run(tokens, &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_generate_with_type_and_count_fills_default_path() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    let (code, _, err) = run(&registry, &["generate", "--type", "act", "--count", "5"]);

    assert_eq!(code, 0, "stderr: {err}");
    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (name, args) = &calls[0];
    assert_eq!(name, "generate");
    assert_eq!(args.len(), 3);
    assert_eq!(args.get("type"), Some(&FlagValue::from("act")));
    assert_eq!(args.get("count"), Some(&FlagValue::Number(5.0)));
    assert_eq!(args.get("path"), Some(&FlagValue::from("./data/acts.json")));
}

#[test]
fn test_request_without_url_fails_on_missing_flag() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);
    let dispatcher = Dispatcher::new(&registry, HelpRenderer::new("catalog-requests", Palette::plain()));

    assert_eq!(
        dispatcher.dispatch(["request", "--action", "getActs"]).unwrap_err(),
        DispatchError::Flag(FlagError::MissingRequiredFlag {
            flag: "-u, --url <url:string>".to_string(),
        })
    );

    let (code, out, err) = run(&registry, &["request", "--action", "getActs"]);
    assert_eq!(code, 1);
    assert!(out.contains("COMMANDS"));
    assert!(err.contains("Missing required flag -u, --url <url:string>"));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_help_lists_every_command_and_example() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    let (code, out, err) = run(&registry, &["help"]);

    assert_eq!(code, 0);
    assert!(err.is_empty());
    assert!(calls.borrow().is_empty());

    let generate_at = out.find("generate, g\n").unwrap();
    let request_at = out.find("request, r\n").unwrap();
    let examples_at = out.find("EXAMPLES\n").unwrap();
    assert!(generate_at < request_at && request_at < examples_at);

    assert!(out.contains(" -c, --count <count:number> Specify the number of items"));
    assert!(out.contains(" createManyActs: Create multiple acts\n"));
    let examples: Vec<&str> = out[examples_at..].lines().skip(1).collect();
    assert_eq!(
        examples,
        vec![
            " catalog-requests help",
            " catalog-requests generate --type act --count 10 --path ./data/acts.json",
            " catalog-requests request -u http://localhost:3000/acts -a createManyActs -r 1-5",
        ]
    );
}

#[test]
fn test_alias_resolves_and_range_passes_through() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    let (code, _, err) = run(
        &registry,
        &[
            "r",
            "--url",
            "http://x/acts",
            "--action",
            "createManyActs",
            "--range",
            "1-5",
        ],
    );

    assert_eq!(code, 0, "stderr: {err}");
    let calls = calls.borrow();
    let (name, args) = &calls[0];
    assert_eq!(name, "request");
    assert_eq!(args.str("range").unwrap(), "1-5");
    assert_eq!(args.str("url").unwrap(), "http://x/acts");
    assert_eq!(args.str("action").unwrap(), "createManyActs");
    assert_eq!(args.usize("index").unwrap(), 0);
    assert_eq!(args.str("path").unwrap(), "./data/acts.json");
}

#[test]
fn test_clean_args_hold_exactly_the_declared_long_names() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    let (code, _, _) = run(
        &registry,
        &["r", "-u", "http://x/acts", "-a", "getActs", "--extra", "1"],
    );

    assert_eq!(code, 0);
    let calls = calls.borrow();
    let names: Vec<&str> = calls[0].1.names().collect();
    assert_eq!(names, vec!["action", "index", "path", "range", "url"]);
}

#[test]
fn test_type_error_wins_over_missing_required() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);
    let dispatcher = Dispatcher::new(&registry, HelpRenderer::new("catalog-requests", Palette::plain()));

    let err = dispatcher
        .dispatch(["generate", "--count", "many"])
        .unwrap_err();

    assert_eq!(
        err,
        DispatchError::Flag(FlagError::InvalidFlagType {
            flag: "-c, --count <count:number>".to_string(),
            expected: ValueType::Number,
            found: ValueType::String,
        })
    );
}

#[test]
fn test_unknown_command_exits_with_failure() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    let (code, out, err) = run(&registry, &["upload"]);

    assert_eq!(code, 1);
    assert!(out.starts_with("Usage: catalog-requests <command> [options]"));
    assert!(err.contains("Command not found: upload"));
}

#[test]
fn test_every_required_flag_is_one_of_all() {
    let calls = Calls::default();
    let registry = catalog_registry(&calls);

    for command in registry.commands() {
        for required in command.flags.required() {
            assert!(
                command
                    .flags
                    .all()
                    .iter()
                    .any(|flag| std::ptr::eq(flag, required)),
                "{} in {}",
                required.long,
                command.canonical_name()
            );
        }
    }
}

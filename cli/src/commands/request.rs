//! `request`: drive the catalog backend's act endpoints with generated data.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use catalog_cli_core::{
    ActionSet, CommandArgs, CommandFlags, CommandSpec, FlagSpec, HandlerError, HandlerResult,
    SchemaError, ValueType,
};
use catalog_data::{Act, IndexRange, item_at, read_acts};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::http::{ApiClient, Method};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid action '{value}', supported actions are: {supported}")]
pub struct UnknownAction {
    value: String,
    supported: String,
}

/// The `--action` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetActs,
    CreateAct,
    GetActById,
    UpdateAct,
    DeleteAct,
    CreateManyActs,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::GetActs,
        Action::CreateAct,
        Action::GetActById,
        Action::UpdateAct,
        Action::DeleteAct,
        Action::CreateManyActs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetActs => "getActs",
            Action::CreateAct => "createAct",
            Action::GetActById => "getActById",
            Action::UpdateAct => "updateAct",
            Action::DeleteAct => "deleteAct",
            Action::CreateManyActs => "createManyActs",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Action::GetActs => "Get all acts",
            Action::CreateAct => "Create a new act",
            Action::GetActById => "Get an act by ID",
            Action::UpdateAct => "Update an act by ID",
            Action::DeleteAct => "Delete an act by ID",
            Action::CreateManyActs => "Create multiple acts",
        }
    }

    /// Printed before the response body.
    fn label(self) -> &'static str {
        match self {
            Action::GetActs => "Retrieved acts:",
            Action::CreateAct => "Created act:",
            Action::GetActById => "Retrieved act by ID:",
            Action::UpdateAct => "Updated act:",
            Action::DeleteAct => "Deleted act:",
            Action::CreateManyActs => "Created acts:",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction {
                value: s.to_string(),
                supported: Action::ALL.map(Action::as_str).join(", "),
            })
    }
}

pub fn command(program: &str, timeout: Duration) -> Result<CommandSpec, SchemaError> {
    let flags = CommandFlags::new(
        vec![
            FlagSpec::new("u", "url", ValueType::String)
                .with_description("Specify the URL for the request (required)"),
            FlagSpec::new("p", "path", ValueType::String)
                .with_default(super::generate::DEFAULT_PATH)
                .with_description("Specify the path to read generated data (default: ./data/acts.json)"),
            FlagSpec::new("a", "action", ValueType::String)
                .with_description("Specify the action for request command (required)"),
            FlagSpec::new("i", "index", ValueType::Number)
                .with_default(0)
                .with_description("Specify the index of the data for request command (default: 0)"),
            FlagSpec::new("r", "range", ValueType::String)
                .with_default("all")
                .with_description("Specify the range of data to read (default: all)"),
        ],
        &["url", "action"],
    )?;

    let actions = Action::ALL
        .into_iter()
        .fold(ActionSet::new("ACTIONS"), |set, action| {
            set.with_option(action.as_str(), action.description())
        });

    Ok(
        CommandSpec::new("request, r", "Perform API requests", move |args| {
            run(&ApiClient::new(timeout), args)
        })
        .with_flags(flags)
        .with_actions(actions)
        .with_example(&format!(
            "{program} request --url http://localhost:3000/acts --action createAct --path ./data/acts.json --index 1"
        ))
        .with_example(&format!(
            "{program} request -u http://localhost:3000/acts -a createManyActs -r 1-5"
        )),
    )
}

/// One backend call, fully resolved from the arguments and data file.
#[derive(Debug, PartialEq)]
struct Call {
    method: Method,
    url: String,
    body: Option<Value>,
}

fn run(client: &ApiClient, args: &CommandArgs) -> HandlerResult {
    let action: Action = args.str("action")?.parse()?;
    let call = plan(action, args)?;
    let response = client.send(call.method, &call.url, call.body.as_ref())?;
    println!("{}", action.label());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn plan(action: Action, args: &CommandArgs) -> Result<Call, HandlerError> {
    let url = args.str("url")?;
    let by_id = |act: &Act| format!("{}/{}", url.trim_end_matches('/'), act.id);

    let call = match action {
        Action::GetActs => Call {
            method: Method::Get,
            url: url.to_string(),
            body: None,
        },
        Action::CreateAct => Call {
            method: Method::Post,
            url: url.to_string(),
            body: Some(serde_json::to_value(indexed_act(args)?)?),
        },
        Action::GetActById => Call {
            method: Method::Get,
            url: by_id(&indexed_act(args)?),
            body: None,
        },
        Action::UpdateAct => {
            let act = indexed_act(args)?;
            Call {
                method: Method::Put,
                url: by_id(&act),
                body: Some(serde_json::to_value(&act)?),
            }
        }
        Action::DeleteAct => Call {
            method: Method::Delete,
            url: by_id(&indexed_act(args)?),
            body: None,
        },
        Action::CreateManyActs => {
            let acts = load_acts(args)?;
            let range: IndexRange = args.str("range")?.parse()?;
            Call {
                method: Method::Post,
                url: url.to_string(),
                body: Some(json!({ "acts": range.select(&acts)? })),
            }
        }
    };
    Ok(call)
}

fn load_acts(args: &CommandArgs) -> Result<Vec<Act>, HandlerError> {
    let path = args.str("path")?;
    let acts = read_acts(path)?;
    debug!(path, count = acts.len(), "Loaded acts");
    Ok(acts)
}

fn indexed_act(args: &CommandArgs) -> Result<Act, HandlerError> {
    let acts = load_acts(args)?;
    Ok(item_at(&acts, args.usize("index")?)?.clone())
}

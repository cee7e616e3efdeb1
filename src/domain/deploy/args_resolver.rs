use crate::api::errors::ActionError;
use crate::constants::{
    BRANCH_REF_PREFIX, CHANGE_TYPE_KEY, DEFAULT_BRANCH, MAJOR_MARKER, MANDATORY_KEYS,
    MINOR_MARKER, OPTIONAL_KEYS, TAG_REF_PREFIX,
};
use crate::domain::deploy::deployment_args::{ChangeType, DeploymentArgs};
use crate::domain::deploy::vcs_context::{Commit, VcsContext};
use log::debug;
use serde_json::{Map, Value as JsonValue};
use serde_yaml::{Mapping, Value};

/// Args after type validation, before anything is derived from the context.
#[derive(Debug, Clone, PartialEq)]
struct ValidatedArgs {
    app: String,
    environment: String,
    branch: Option<String>,
    cluster: Option<String>,
    domain: Option<String>,
    tag: Option<String>,
    sha: Option<String>,
    extra: Map<String, JsonValue>,
}

/// Turn the raw `args` input into the record posted to the orchestration service.
///
/// Explicit values in the input always win; the context only fills gaps.
pub fn resolve(raw_input: &str, context: &VcsContext) -> Result<DeploymentArgs, ActionError> {
    let parsed = parse_raw_args(raw_input)?;
    let validated = validate(parsed)?;
    let resolved = DeploymentArgs {
        change_type: detect_change_type(&context.commits),
        ..derive_from_ref(validated, context)
    };

    Ok(resolved)
}

/// JSON first, then YAML. The first complete parse wins.
///
/// Both land in a YAML value so `.nan` and `.inf` stay numbers.
fn parse_raw_args(raw_input: &str) -> Result<Value, ActionError> {
    debug!("Parsing raw args '{}'...", raw_input);

    if let Ok(value) = serde_json::from_str::<Value>(raw_input) {
        debug!("Loaded args as JSON");
        return Ok(value);
    }

    serde_yaml::from_str::<Value>(raw_input)
        .map(|value| {
            debug!("Loaded args as YAML");
            value
        })
        .map_err(|_| ActionError::Parse {
            raw: raw_input.to_string(),
        })
}

fn validate(parsed: Value) -> Result<ValidatedArgs, ActionError> {
    // A scalar or a list has no keys, so `app` is reported missing.
    let fields = match parsed {
        Value::Mapping(fields) => fields,
        _ => Mapping::new(),
    };

    let app = mandatory_string(&fields, "app")?;
    let environment = mandatory_string(&fields, "environment")?;

    let branch = optional_string(&fields, "branch")?;
    let cluster = optional_string(&fields, "cluster")?;
    let domain = optional_string(&fields, "domain")?;
    let tag = optional_string(&fields, "tag")?;
    let sha = optional_string(&fields, "sha")?;

    let extra = fields
        .iter()
        .filter_map(|(key, value)| {
            let key = match key {
                Value::String(key) => key.clone(),
                other => display_found(Some(other)),
            };
            if is_known_key(&key) {
                return None;
            }
            Some((key, serde_json::to_value(value).unwrap_or(JsonValue::Null)))
        })
        .collect();

    Ok(ValidatedArgs {
        app,
        environment,
        branch,
        cluster,
        domain,
        tag,
        sha,
        extra,
    })
}

fn is_known_key(key: &str) -> bool {
    MANDATORY_KEYS.contains(&key) || OPTIONAL_KEYS.contains(&key) || key == CHANGE_TYPE_KEY
}

fn mandatory_string(fields: &Mapping, key: &str) -> Result<String, ActionError> {
    match fields.get(key) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        found => Err(ActionError::MissingMandatory {
            key: key.to_string(),
            found: display_found(found),
        }),
    }
}

fn optional_string(fields: &Mapping, key: &str) -> Result<Option<String>, ActionError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        found => Err(ActionError::InvalidOptional {
            key: key.to_string(),
            found: display_found(found),
        }),
    }
}

/// Render an offending value the way it shows up in diagnostics.
fn display_found(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(value)) => value.clone(),
        Some(Value::Bool(value)) => value.to_string(),
        Some(Value::Number(value)) if value.is_nan() => "NaN".to_string(),
        Some(Value::Number(value)) if value.is_infinite() => {
            if value.as_f64().map_or(false, |value| value < 0.0) {
                "-Infinity".to_string()
            } else {
                "Infinity".to_string()
            }
        }
        Some(Value::Number(value)) => value.to_string(),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_found(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Mapping(_)) => "[object Object]".to_string(),
        Some(Value::Tagged(tagged)) => display_found(Some(&tagged.value)),
    }
}

/// An empty `branch`, `tag` or `sha` is still sent as given, but never
/// blocks derivation.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |value| !value.is_empty())
}

/// Fill tag, branch and sha from the ref and commit of the run.
///
/// A tag ref always implies the default branch. A tag-identified release
/// never gets a sha stamped from the context.
fn derive_from_ref(validated: ValidatedArgs, context: &VcsContext) -> DeploymentArgs {
    let ref_tag = ref_name(&context.git_ref, TAG_REF_PREFIX);
    let ref_branch = ref_name(&context.git_ref, BRANCH_REF_PREFIX);

    let (tag, branch) = match ref_tag {
        Some(ref_tag) if !is_set(&validated.tag) => {
            (Some(ref_tag), Some(DEFAULT_BRANCH.to_string()))
        }
        _ => (
            validated.tag,
            validated.branch.filter(|branch| !branch.is_empty()).or(ref_branch),
        ),
    };

    let sha = if !is_set(&tag) && !is_set(&validated.sha) {
        Some(context.sha.clone()).filter(|sha| !sha.is_empty())
    } else {
        validated.sha
    };

    DeploymentArgs {
        app: validated.app,
        environment: validated.environment,
        branch: branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        tag,
        sha,
        cluster: validated.cluster,
        domain: validated.domain,
        change_type: None,
        extra: validated.extra,
    }
}

fn ref_name(git_ref: &str, prefix: &str) -> Option<String> {
    git_ref
        .strip_prefix(prefix)
        // A bare `refs/tags/` or `refs/heads/` names nothing; the ref is ignored.
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Scan commit messages in push order. `#MAJOR` is sticky for the rest of
/// the scan; no commits means no change type at all.
pub fn detect_change_type(commits: &[Commit]) -> Option<ChangeType> {
    if commits.is_empty() {
        return None;
    }

    let change_type = commits
        .iter()
        .fold(ChangeType::Patch, |current, commit| {
            if current == ChangeType::Major || commit.message.contains(MAJOR_MARKER) {
                ChangeType::Major
            } else if commit.message.contains(MINOR_MARKER) {
                ChangeType::Minor
            } else {
                current
            }
        });

    Some(change_type)
}

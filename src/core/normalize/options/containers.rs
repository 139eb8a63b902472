use crate::core::job::JobThread;
use crate::core::normalize::registry::{NormalizeContext, OptionNormalizer};
use crate::core::normalize::schema::{Field, Schema};
use crate::core::normalize::{template, NormalizeError};
use serde_json::{json, Map, Value};

/// Image prepended ahead of user containers when `decorate` is set.
pub const DECORATE_IMAGE: &str = "quay.io/pipewright/tools:v20250812";

const OPTION: &str = "containers";

/// Normalizer for the `containers` option.
///
/// Accepts a bare image string, a single container mapping, or a sequence
/// mixing both, and produces the canonical ordered list of container run
/// descriptors handed to the execution engine. The canonical key is always
/// written back, as an empty list when no containers were requested.
pub struct Containers {
    schema: Schema,
}

impl Default for Containers {
    fn default() -> Self {
        Self::new()
    }
}

impl Containers {
    pub fn new() -> Self {
        Containers {
            schema: container_schema(),
        }
    }

    fn normalize_entry(
        &self,
        entry: &Value,
        thread: &JobThread,
        ctx: &NormalizeContext,
    ) -> Result<Map<String, Value>, NormalizeError> {
        let fields = self.schema.normalize(entry)?;

        let image = match fields.get("image") {
            Some(Value::String(image)) => template::resolve(image, thread),
            _ => return Err(NormalizeError::data("Image missing in container config")),
        };
        let command = fields.get("command").cloned();
        // Explicit args always win, even when empty. A command without args
        // leaves args absent; otherwise args defaults to the job script.
        let args = match fields.get("args") {
            Some(args) => Some(args.clone()),
            None if command.is_some() => None,
            None => Some(Value::Array(vec![Value::String(script_name(thread)?)])),
        };

        if let Some(security) = fields.get("securityContext") {
            if !ctx.policy.is_secure(&image) {
                return Err(NormalizeError::syntax("Security set for insecure image"));
            }
            let restricting = security.as_object().map_or(false, |m| !m.is_empty());
            if restricting && command.is_some() {
                return Err(NormalizeError::syntax("`command` forbidden for secure image"));
            }
        }

        let mut spec = Map::new();
        spec.insert("image".to_string(), Value::String(image));
        if let Some(args) = args {
            spec.insert("args".to_string(), args);
        }
        if let Some(command) = command {
            spec.insert("command".to_string(), command);
        }
        if let Some(dir) = fields.get("workingDir") {
            spec.insert("workingDir".to_string(), dir.clone());
        }
        if let Some(security) = fields.get("securityContext") {
            spec.insert("securityContext".to_string(), security.clone());
        }
        Ok(spec)
    }
}

impl OptionNormalizer for Containers {
    fn option(&self) -> &'static str {
        OPTION
    }

    fn normalize(
        &self,
        mut thread: JobThread,
        ctx: &NormalizeContext,
    ) -> Result<JobThread, NormalizeError> {
        let raw = thread.options.get(OPTION).cloned().unwrap_or(Value::Null);
        let entries = coerce_entries(raw);
        let mut specs = Vec::with_capacity(entries.len());
        for entry in &entries {
            specs.push(self.normalize_entry(entry, &thread, ctx)?);
        }
        if decorate_requested(&thread) && !specs.is_empty() && !already_decorated(&specs) {
            specs.insert(0, decorator_spec());
        }
        tracing::debug!(
            job = %thread.coordinate(),
            containers = specs.len(),
            "normalized container list"
        );
        let canonical = Value::Array(specs.into_iter().map(Value::Object).collect());
        thread.options.insert(OPTION.to_string(), canonical);
        Ok(thread)
    }
}

fn container_schema() -> Schema {
    Schema::new("Invalid container config given")
        .scalar_shorthand("image")
        .field(
            Field::required("image", "Image missing in container config")
                .text("Invalid container image given"),
        )
        .field(Field::optional("args").string_seq("Invalid container args given"))
        .field(Field::optional("command").string_seq("Invalid container command given"))
        .field(
            Field::optional("workingdir")
                .renamed("workingDir")
                .text("Invalid container working directory given"),
        )
        .field(
            Field::optional("securitycontext")
                .renamed("securityContext")
                .nested(
                    security_context_schema(),
                    "Invalid container security context given",
                ),
        )
}

fn security_context_schema() -> Schema {
    Schema::new("Invalid container security context given")
        .field(
            Field::optional("runasuser")
                .renamed("runAsUser")
                .scalar("Invalid runAsUser given"),
        )
        .field(
            Field::optional("runasgroup")
                .renamed("runAsGroup")
                .scalar("Invalid runAsGroup given"),
        )
}

/// Coerce the raw option value to an ordered sequence of raw entries.
///
/// Only an explicit sequence can yield zero entries; any other non-null
/// value is a singleton.
fn coerce_entries(raw: Value) -> Vec<Value> {
    match raw {
        Value::Null => Vec::new(),
        Value::Array(entries) => entries,
        other => vec![other],
    }
}

fn decorate_requested(thread: &JobThread) -> bool {
    matches!(thread.options.get("decorate"), Some(Value::Bool(true)))
}

fn already_decorated(specs: &[Map<String, Value>]) -> bool {
    specs.first().map_or(false, |spec| {
        spec.get("image").and_then(Value::as_str) == Some(DECORATE_IMAGE)
    })
}

fn decorator_spec() -> Map<String, Value> {
    let mut spec = Map::new();
    spec.insert(
        "image".to_string(),
        Value::String(DECORATE_IMAGE.to_string()),
    );
    spec.insert("args".to_string(), json!(["decorate"]));
    spec
}

fn script_name(thread: &JobThread) -> Result<String, NormalizeError> {
    thread
        .options
        .get("script")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| NormalizeError::data("Script missing in job options"))
}
